//! Periodic refresh of a listing for the responder view.
//!
//! Each tick fetches the listing once and swaps it in whole. A fetch that
//! fails leaves the previous snapshot in place. Ticks never overlap, so the
//! most recently completed fetch is always the one readers see.

use std::{sync::Arc, time::Duration};

use arc_swap::ArcSwap;
use models::{sos, ListQuery, SosRecord};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::api::SosApi;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub records: Vec<SosRecord>,
    /// Wall-clock ms of the fetch; 0 before the first success.
    pub fetched_at_ms: i64,
    /// Number of successful fetches so far.
    pub generation: u64,
}

pub struct ListingPoller {
    latest: Arc<ArcSwap<Snapshot>>,
    updates: watch::Receiver<u64>,
    handle: JoinHandle<()>,
}

impl ListingPoller {
    /// Fetch immediately, then every `every`.
    pub fn spawn(api: Arc<dyn SosApi>, query: ListQuery, every: Duration) -> Self {
        let latest = Arc::new(ArcSwap::from_pointee(Snapshot::default()));
        let (tx, updates) = watch::channel(0u64);

        let shared = Arc::clone(&latest);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut generation = 0u64;
            loop {
                ticker.tick().await;
                match api.list(&query).await {
                    Ok(records) => {
                        generation += 1;
                        debug!(count = records.len(), generation, "listing refreshed");
                        shared.store(Arc::new(Snapshot {
                            records,
                            fetched_at_ms: sos::now_millis(),
                            generation,
                        }));
                        if tx.send(generation).is_err() {
                            debug!("listing poller has no subscribers left");
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, backend = ?api.backend(), "listing refresh failed; keeping previous snapshot");
                    }
                }
            }
        });

        Self { latest, updates, handle }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.latest.load_full()
    }

    /// Receiver that observes the generation of each successful refresh.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.updates.clone()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for ListingPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
