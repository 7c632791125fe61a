use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::database::models::Product;
use crate::error::ApiError;
use crate::filter::{Filter, ProductField};

use super::utils::non_empty;

/// GET /productos/nombre/:name - case-insensitive substring of the name
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Path(name) = path?;
    let filter = Filter::new().contains(ProductField::Name, name)?;
    let productos = state
        .store
        .find_many(&filter)
        .await
        .map_err(|e| ApiError::store("Error al obtener los productos con el nombre especificado", e))?;

    non_empty(productos, "No se encontraron los productos especificados").map(Json)
}
