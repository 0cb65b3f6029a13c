use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

const PINNED_CONNECTION_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

/// Pool options for `cfg`. In-memory SQLite databases live per connection,
/// so the pool is pinned to one connection that is never recycled.
pub fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if is_sqlite_memory(&cfg.url) {
        opts.max_connections(1)
            .min_connections(1)
            .max_lifetime(PINNED_CONNECTION_LIFETIME)
            .idle_timeout(PINNED_CONNECTION_LIFETIME);
    } else {
        opts.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections);
    }
    opts
}

/// Connect to the table store described by `cfg`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    info!(backend = ?db.get_database_backend(), "table store connected");
    Ok(db)
}

fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}
