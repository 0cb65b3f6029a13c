use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use service::records::{FileRecordStore, RecordStore, SeaOrmRecordStore};
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Pick the record store: the table store when a database URL is configured,
/// otherwise the JSON file under `store.data_dir`.
pub async fn build_store(cfg: &AppConfig) -> Result<Arc<dyn RecordStore>, StartupError> {
    if cfg.database.is_configured() {
        let db = models::db::connect_with_config(&cfg.database).await?;
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Store(format!("migrate up: {e}")))?;
        info!(store = "table", "record store ready");
        let store: Arc<dyn RecordStore> = Arc::new(SeaOrmRecordStore::new(db));
        return Ok(store);
    }

    common::env::ensure_data_dir(&cfg.store.data_dir).await?;
    let path = cfg.store.file_path();
    let store: Arc<dyn RecordStore> = FileRecordStore::open(&path)
        .await
        .map_err(|e| StartupError::Store(e.to_string()))?;
    info!(store = "file", path = %path.display(), "record store ready");
    Ok(store)
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Router plus background sweeper for the given store.
pub fn build_app(cfg: &AppConfig, store: Arc<dyn RecordStore>) -> Router {
    if cfg.store.sweep_interval_secs > 0 {
        service::sweeper::spawn_expiry_sweeper(
            Arc::clone(&store),
            Duration::from_secs(cfg.store.sweep_interval_secs),
        );
    }
    routes::build_router(AppState::new(store), routes::build_cors())
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    service::metrics::init();

    let store = build_store(&cfg).await?;
    let app = build_app(&cfg, store);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting sos server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("received Ctrl+C, draining connections");
        })
        .await?;
    Ok(())
}
