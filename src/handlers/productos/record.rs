use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};

use crate::app::AppState;
use crate::database::models::{Product, ProductDocument, ProductPatch, ProductUpdate};
use crate::error::ApiError;

use super::utils::parse_key;

const PATCH_FAILED: &str = "Error al actualizar parcialmente un producto";
const PUT_FAILED: &str = "Error al actualizar un producto";

/// GET /productos/:key - Get a single product by record key
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(key) = path?;
    let id = parse_key(&key)?;
    state
        .store
        .find_by_key(id)
        .await
        .map_err(|e| ApiError::store("Error al buscar un producto por su ID", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Producto con ID:{} no encontrado", key)))
}

/// DELETE /productos/:key - Returns the removed product
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(key) = path?;
    let id = parse_key(&key)?;
    let eliminado = state
        .store
        .delete_by_key(id)
        .await
        .map_err(|e| ApiError::store("Error al eliminar el producto", e))?
        .ok_or_else(|| ApiError::not_found("Producto no encontrado para borrar"))?;

    tracing::info!(key = %eliminado.key, "Producto eliminado");
    Ok(Json(eliminado))
}

/// PATCH /productos/:key - Merge the given fields into the product
pub async fn patch(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(key) = path?;
    let id = parse_key(&key)?;
    let Json(patch) = payload.map_err(|r| ApiError::json_body(r, PATCH_FAILED))?;

    state
        .store
        .update_by_key(id, ProductUpdate::Merge(patch))
        .await
        .map_err(|e| ApiError::store(PATCH_FAILED, e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Producto no encontrado para su actualización parcial"))
}

/// PUT /productos/:key - Overwrite the product body; absent fields are cleared
pub async fn put(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ProductDocument>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(key) = path?;
    let id = parse_key(&key)?;
    let Json(document) = payload.map_err(|r| ApiError::json_body(r, PUT_FAILED))?;

    state
        .store
        .update_by_key(id, ProductUpdate::Replace(document))
        .await
        .map_err(|e| ApiError::store(PUT_FAILED, e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Producto no encontrado para su actualización"))
}
