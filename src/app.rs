use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::database::ProductStore;
use crate::error::ApiError;
use crate::handlers;

/// Shared request state. The store is opened once at startup and handed in here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: impl ProductStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }
}

/// Routes only, no middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::welcome))
        .route("/health", get(handlers::root::health))
        .merge(productos_routes())
        // Must follow every route: it only covers routes registered so far
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(fallback)
        .with_state(state)
}

/// Routes plus the HTTP middleware selected by `config`.
pub fn app(state: AppState, config: &ApiConfig) -> Router {
    let mut app = router(state).layer(DefaultBodyLimit::max(config.max_request_size_bytes));
    if config.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if config.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

fn productos_routes() -> Router<AppState> {
    use handlers::productos;

    Router::new()
        // Collection
        .route("/productos", get(productos::list_get).post(productos::create_post))
        .route("/productos/categorias", get(productos::categories_get))
        // Record by key
        .route(
            "/productos/:key",
            get(productos::record_get)
                .put(productos::record_put)
                .patch(productos::record_patch)
                .delete(productos::record_delete),
        )
        // Searches
        .route("/productos/importes/mayor/:amount", get(productos::amount_greater_than))
        .route("/productos/importes/menor/:amount", get(productos::amount_less_than))
        .route("/productos/nombre/:name", get(productos::name_get))
        .route("/productos/rango/:min/:max", get(productos::amount_range))
}

async fn fallback() -> ApiError {
    ApiError::not_found("Ruta no encontrada")
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Método no permitido")
}
