#![cfg(test)]
use std::{path::PathBuf, sync::Arc};

use migration::MigratorTrait;
use models::{sos, EmergencyType, Location, SosRecord};

use crate::records::{FileRecordStore, SeaOrmRecordStore};

/// Live record with the given creation timestamp. The ttl is anchored to the
/// current clock so old timestamps do not make the record expire.
pub fn record_at(kind: EmergencyType, timestamp_ms: i64) -> SosRecord {
    let manila = Location { lat: 14.5995, lng: 120.9842 };
    let notes = format!("{kind} at {timestamp_ms}");
    let mut r = SosRecord::new(kind, manila, notes, timestamp_ms);
    r.ttl = sos::now_secs() + sos::TTL_SECS;
    r
}

pub fn expired_record(kind: EmergencyType) -> SosRecord {
    let mut r = record_at(kind, sos::now_millis() - 8 * 24 * 3_600_000);
    r.ttl = sos::now_secs() - 1;
    r
}

pub async fn temp_file_store() -> anyhow::Result<(Arc<FileRecordStore>, PathBuf)> {
    let path = std::env::temp_dir().join(format!("sos_store_{}.json", uuid::Uuid::new_v4()));
    let store = FileRecordStore::open(&path).await?;
    Ok((store, path))
}

/// Fresh in-memory SQLite table store with migrations applied.
pub async fn sqlite_store() -> anyhow::Result<SeaOrmRecordStore> {
    let cfg = configs::DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = models::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(SeaOrmRecordStore::new(db))
}
