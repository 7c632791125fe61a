use anyhow::Context;
use tracing_subscriber::EnvFilter;

use productos_api::config::{self, StoreBackend};
use productos_api::database::{MemoryProductStore, PgProductStore};
use productos_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, DATABASE_NAME, PORT
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("productos_api=info,tower_http=info")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Productos API in {:?} mode", config.environment);

    let state = match config.database.backend {
        StoreBackend::Postgres => {
            let store = PgProductStore::connect(&config.database)
                .await
                .context("failed to connect to the product database")?;
            tracing::info!("Connected to Postgres product store");
            AppState::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory product store; data is lost on exit");
            AppState::new(MemoryProductStore::new())
        }
    };

    let app = productos_api::app(state, &config.api);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Servidor escuchando en: http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
