use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

pub const WELCOME_MESSAGE: &str = "Bienvenido a la API de Productos tecnologicos";

/// GET / - bare JSON string
pub async fn welcome() -> Json<&'static str> {
    Json(WELCOME_MESSAGE)
}

/// GET /health - pings the product store
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.store.health_check().await.map_err(|e| {
        tracing::warn!("Health check failed: {}", e);
        ApiError::service_unavailable("Base de datos no disponible")
    })?;

    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok"
    })))
}
