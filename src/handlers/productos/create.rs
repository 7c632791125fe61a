use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use std::collections::BTreeMap;

use crate::app::AppState;
use crate::database::models::{Product, ProductDocument};
use crate::error::ApiError;

const CREATE_FAILED: &str = "Error al crear un nuevo producto";

/// POST /productos - all four product fields are required
pub async fn post(
    State(state): State<AppState>,
    payload: Result<Json<ProductDocument>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(document) = payload.map_err(|r| ApiError::json_body(r, CREATE_FAILED))?;

    let missing = document.missing_fields();
    if !missing.is_empty() {
        let field_errors: BTreeMap<String, String> = missing
            .iter()
            .map(|field| (field.to_string(), "Campo obligatorio".to_string()))
            .collect();
        return Err(ApiError::validation_error(
            format!("Faltan campos obligatorios: {}", missing.join(", ")),
            Some(field_errors),
        ));
    }

    let producto = state
        .store
        .insert(document)
        .await
        .map_err(|e| ApiError::store(CREATE_FAILED, e))?;

    tracing::info!(key = %producto.key, "Producto creado");
    Ok((StatusCode::CREATED, Json(producto)))
}
