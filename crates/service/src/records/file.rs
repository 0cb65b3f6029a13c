use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::{sos, SosRecord, SosStatus, TypeFilter};
use tracing::debug;

use super::{apply_status, RecordFilter, RecordStore};
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Embedded record store persisted as a JSON file keyed by record id.
///
/// Used by the server when no table store is configured and by the client's
/// local fallback.
pub struct FileRecordStore {
    store: Arc<JsonMapStore<String, SosRecord>>,
}

impl FileRecordStore {
    /// Open (or create) the store file.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, SosRecord>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// Number of stored records, expired ones included.
    pub async fn raw_len(&self) -> usize {
        self.store.len().await
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn put(&self, record: SosRecord) -> Result<(), ServiceError> {
        self.store.insert(record.id.clone(), record).await
    }

    async fn get(&self, id: &str) -> Result<Option<SosRecord>, ServiceError> {
        let now = sos::now_secs();
        Ok(self
            .store
            .get(&id.to_string())
            .await
            .filter(|r| !r.is_expired(now)))
    }

    async fn update_status(
        &self,
        id: &str,
        status: SosStatus,
    ) -> Result<(SosRecord, bool), ServiceError> {
        let now = sos::now_secs();
        let now_ms = sos::now_millis();
        self.store
            .update_map(|map| {
                let rec = map
                    .get_mut(id)
                    .filter(|r| !r.is_expired(now))
                    .ok_or_else(|| ServiceError::not_found("SOS submission"))?;
                let changed = apply_status(rec, status, now_ms)?;
                Ok((rec.clone(), changed))
            })
            .await
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<SosRecord>, ServiceError> {
        if filter.kind == TypeFilter::Unknown {
            return Ok(Vec::new());
        }
        let now = sos::now_secs();
        Ok(self
            .store
            .values()
            .await
            .into_iter()
            .filter(|r| !r.is_expired(now) && filter.matches(r))
            .collect())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let now = sos::now_secs();
        self.store
            .update_map(|map| {
                let live = map.get(id).is_some_and(|r| !r.is_expired(now));
                if !live {
                    return Err(ServiceError::not_found("SOS submission"));
                }
                map.remove(id);
                Ok(())
            })
            .await
    }

    async fn purge_expired(&self, now_secs: i64) -> Result<usize, ServiceError> {
        let removed = self
            .store
            .update_map(|map| {
                let before = map.len();
                map.retain(|_, r| !r.is_expired(now_secs));
                Ok(before - map.len())
            })
            .await?;
        debug!(removed, "file store purge");
        Ok(removed)
    }
}
