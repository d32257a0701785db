use std::sync::Arc;

use scenthood::{
    config::{Config, StorageKind},
    db::{self, MemoryStore, PerfumeStore, PgStore},
    routes::{create_router, AppState},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenthood=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn PerfumeStore> = match config.storage {
        StorageKind::Postgres => {
            let max_connections = config.database_max_connections;
            let pool = db::create_pool(&config.database_url, max_connections).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage, data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let app = create_router(Arc::new(AppState::new(store)));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, storage = ?config.storage, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
