//! Record store: persistence for SOS records.
//!
//! Expiry is enforced here. A record whose `ttl` has passed is treated as
//! absent by every read and mutation, and `purge_expired` removes it for good.

use async_trait::async_trait;
use models::{SosRecord, SosStatus, TypeFilter};

use crate::errors::ServiceError;

pub mod file;
pub mod seaorm;

pub use file::FileRecordStore;
pub use seaorm::SeaOrmRecordStore;

/// Which statuses a listing returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Everything that is not resolved.
    #[default]
    Unresolved,
    Only(SosStatus),
    Any,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub kind: TypeFilter,
    pub status: StatusFilter,
}

impl RecordFilter {
    pub fn matches(&self, rec: &SosRecord) -> bool {
        let status_ok = match self.status {
            StatusFilter::Unresolved => rec.status != SosStatus::Resolved,
            StatusFilter::Only(s) => rec.status == s,
            StatusFilter::Any => true,
        };
        status_ok && self.kind.matches(rec.kind)
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record.
    async fn put(&self, record: SosRecord) -> Result<(), ServiceError>;

    /// Fetch a live record.
    async fn get(&self, id: &str) -> Result<Option<SosRecord>, ServiceError>;

    /// Set `status` and stamp `updated_at`, returning the full record and
    /// whether it changed. Last writer wins.
    async fn update_status(
        &self,
        id: &str,
        status: SosStatus,
    ) -> Result<(SosRecord, bool), ServiceError>;

    /// Full scan of live records matching `filter`, in no particular order.
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<SosRecord>, ServiceError>;

    async fn delete(&self, id: &str) -> Result<(), ServiceError>;

    /// Remove records with `ttl <= now_secs`; returns how many were removed.
    async fn purge_expired(&self, now_secs: i64) -> Result<usize, ServiceError>;
}

/// Apply a status change in place. Returns whether the record changed;
/// setting the current status again is a no-op.
pub(crate) fn apply_status(
    rec: &mut SosRecord,
    status: SosStatus,
    now_ms: i64,
) -> Result<bool, ServiceError> {
    if rec.status == status {
        return Ok(false);
    }
    if !rec.status.can_transition_to(status) {
        return Err(ServiceError::Conflict(format!(
            "SOS {} cannot move from {} to {}",
            rec.id, rec.status, status
        )));
    }
    rec.status = status;
    rec.updated_at = Some(now_ms);
    Ok(true)
}
