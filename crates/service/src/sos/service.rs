use std::sync::Arc;

use models::{sos, ListQuery, SosRecord, SosStatus, SubmitSos};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::metrics;
use crate::records::{RecordFilter, RecordStore, StatusFilter};

/// Application service for SOS submission, listing and resolution.
/// Validation happens here, before any store access.
pub struct SosService<R: RecordStore + ?Sized> {
    store: Arc<R>,
}

impl<R: RecordStore + ?Sized> Clone for SosService<R> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<R: RecordStore + ?Sized> SosService<R> {
    pub fn new(store: Arc<R>) -> Self { Self { store } }

    pub fn store(&self) -> &Arc<R> { &self.store }

    /// Validate and persist a new active record.
    #[instrument(skip(self, input))]
    pub async fn submit(&self, input: SubmitSos) -> Result<SosRecord, ServiceError> {
        let valid = input.validate()?;
        let record = SosRecord::new(valid.kind, valid.location, valid.notes, sos::now_millis());
        self.store.put(record.clone()).await?;
        metrics::SUBMITTED_TOTAL.inc();
        info!(id = %record.id, kind = %record.kind, "sos_submitted");
        Ok(record)
    }

    /// Records matching `query`, newest first. Without an explicit status
    /// only unresolved records are returned.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<SosRecord>, ServiceError> {
        let filter = RecordFilter {
            kind: query.type_filter(),
            status: query.status.map(StatusFilter::Only).unwrap_or_default(),
        };
        let mut records = self.store.list(&filter).await?;
        sort_newest_first(&mut records);
        info!(count = records.len(), "sos_listed");
        Ok(records)
    }

    /// Mark a record resolved. Resolving an already resolved record returns
    /// it unchanged.
    #[instrument(skip(self))]
    pub async fn resolve(&self, id: &str) -> Result<SosRecord, ServiceError> {
        let id = require_id(id)?;
        let (record, changed) = self.store.update_status(id, SosStatus::Resolved).await?;
        if changed {
            metrics::RESOLVED_TOTAL.inc();
            info!(id = %record.id, "sos_resolved");
        } else {
            debug!(id = %record.id, "sos already resolved");
        }
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let id = require_id(id)?;
        self.store.delete(id).await?;
        metrics::DELETED_TOTAL.inc();
        info!(%id, "sos_deleted");
        Ok(())
    }

    /// Whether the backing store currently holds any live record.
    pub async fn is_empty(&self) -> Result<bool, ServiceError> {
        let any = RecordFilter { status: StatusFilter::Any, ..Default::default() };
        Ok(self.store.list(&any).await?.is_empty())
    }
}

fn require_id(id: &str) -> Result<&str, ServiceError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ServiceError::Validation("Missing SOS ID".into()));
    }
    Ok(id)
}

/// Newest first; equal timestamps fall back to id order so output is stable.
pub fn sort_newest_first(records: &mut [SosRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
}
