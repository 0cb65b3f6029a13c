//! Background removal of expired records.

use std::{sync::Arc, time::Duration};

use models::sos;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::metrics;
use crate::records::RecordStore;

/// Spawn a task that calls `purge_expired` every `every`.
pub fn spawn_expiry_sweeper<R>(store: Arc<R>, every: Duration) -> JoinHandle<()>
where
    R: RecordStore + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = every.as_secs(), "expiry sweeper started");
        loop {
            ticker.tick().await;
            sweep_once(store.as_ref()).await;
        }
    })
}

/// One sweep pass; failures are logged and retried on the next tick.
pub async fn sweep_once<R: RecordStore + ?Sized>(store: &R) -> usize {
    match store.purge_expired(sos::now_secs()).await {
        Ok(0) => {
            debug!("expiry sweep: nothing to remove");
            0
        }
        Ok(n) => {
            metrics::EXPIRED_PURGED_TOTAL.inc_by(n as u64);
            info!(removed = n, "expiry sweep removed records");
            n
        }
        Err(e) => {
            warn!(error = %e, "expiry sweep failed");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{RecordFilter, StatusFilter};
    use crate::test_support::{expired_record, record_at, temp_file_store};
    use models::EmergencyType;

    #[tokio::test]
    async fn sweep_removes_only_expired() -> anyhow::Result<()> {
        let (store, path) = temp_file_store().await?;
        store.put(expired_record(EmergencyType::Food)).await?;
        store.put(expired_record(EmergencyType::Water)).await?;
        let live = record_at(EmergencyType::Food, 1_000);
        store.put(live.clone()).await?;

        assert_eq!(sweep_once(store.as_ref()).await, 2);
        assert_eq!(store.raw_len().await, 1);
        let any = RecordFilter { status: StatusFilter::Any, ..Default::default() };
        assert_eq!(store.list(&any).await?, vec![live]);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn spawned_sweeper_runs_immediately() -> anyhow::Result<()> {
        let (store, path) = temp_file_store().await?;
        store.put(expired_record(EmergencyType::Other)).await?;

        let handle = spawn_expiry_sweeper(store.clone(), Duration::from_secs(3600));
        for _ in 0..50 {
            if store.raw_len().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        handle.abort();
        assert_eq!(store.raw_len().await, 0);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
