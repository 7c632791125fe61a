use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::database::models::Product;
use crate::error::ApiError;
use crate::filter::{Filter, ProductField};

use super::utils::{non_empty, parse_decimal};

/// GET /productos/importes/mayor/:amount - amount strictly greater
pub async fn greater_than(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Path(amount) = path?;
    let filter = Filter::new().gt(ProductField::Amount, parse_decimal(&amount)?)?;
    let productos = state
        .store
        .find_many(&filter)
        .await
        .map_err(|e| ApiError::store("Error al obtener los productos", e))?;

    non_empty(productos, "No se encontro un producto con un precio mayor al indicado").map(Json)
}

/// GET /productos/importes/menor/:amount - amount strictly less
pub async fn less_than(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Path(amount) = path?;
    let filter = Filter::new().lt(ProductField::Amount, parse_decimal(&amount)?)?;
    let productos = state
        .store
        .find_many(&filter)
        .await
        .map_err(|e| ApiError::store("Error al obtener los productos", e))?;

    non_empty(productos, "No se encontro un producto con un precio menor al indicado").map(Json)
}

/// GET /productos/rango/:min/:max - amount within [min, max]
pub async fn range(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Path((min, max)) = path?;
    let filter = Filter::new().between(ProductField::Amount, parse_decimal(&min)?, parse_decimal(&max)?)?;
    let productos = state
        .store
        .find_many(&filter)
        .await
        .map_err(|e| ApiError::store("Error al obtener los productos dentro del rango especificado", e))?;

    non_empty(productos, "No se encontraron productos dentro del rango especificado").map(Json)
}
