use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::Product;
use crate::error::ApiError;
use crate::filter::{Filter, ProductField};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring of the category. Empty or absent returns everything.
    pub categoria: Option<String>,
}

/// GET /productos[?categoria=X]
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(query) = query?;
    let filter = match query.categoria.as_deref().filter(|c| !c.is_empty()) {
        Some(categoria) => Filter::new().contains(ProductField::Category, categoria)?,
        None => Filter::new(),
    };

    let productos = state
        .store
        .find_many(&filter)
        .await
        .map_err(|e| ApiError::store("Error al obtener los productos", e))?;

    Ok(Json(productos))
}
