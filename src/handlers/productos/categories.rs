use axum::{extract::State, response::Json};

use crate::app::AppState;
use crate::database::models::Product;
use crate::error::ApiError;
use crate::filter::Filter;

/// GET /productos/categorias - distinct categories in first-seen order
pub async fn get(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let productos = state
        .store
        .find_many(&Filter::new())
        .await
        .map_err(|e| ApiError::store("Error al obtener las categorias", e))?;

    Ok(Json(unique_categories(productos)))
}

/// Records with a cleared category are skipped.
fn unique_categories(productos: Vec<Product>) -> Vec<String> {
    let mut categorias: Vec<String> = Vec::new();
    for categoria in productos.into_iter().filter_map(|p| p.category) {
        if !categorias.contains(&categoria) {
            categorias.push(categoria);
        }
    }
    categorias
}
