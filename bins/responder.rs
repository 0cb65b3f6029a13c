//! Responder view: polls the open SOS requests and logs them nearest to the
//! map centre first, with type, distance and coordinates.
//!
//! Usage: `responder [type]` where `type` is an emergency type or `all`.

use std::sync::Arc;
use std::time::Duration;

use client::{select_api, ListingPoller, Snapshot};
use dotenvy::dotenv;
use models::geo::{distance_km, format_coordinates, FALLBACK_LOCATION};
use models::{ListQuery, SosRecord, TypeFilter};
use tracing::{error, info, warn};

/// Records paired with their distance from the map centre, nearest first.
fn by_distance(records: &[SosRecord]) -> Vec<(f64, &SosRecord)> {
    let mut ranked: Vec<(f64, &SosRecord)> = records
        .iter()
        .map(|r| (distance_km(&FALLBACK_LOCATION, &r.location), r))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
}

fn report(snapshot: &Snapshot) {
    info!(
        service = "responder",
        event = "listing",
        generation = snapshot.generation,
        count = snapshot.records.len(),
        "open SOS requests"
    );
    for (km, rec) in by_distance(&snapshot.records) {
        let meta = rec.kind.info();
        info!(
            id = %rec.id,
            kind = meta.label,
            icon = meta.icon,
            distance_km = %format!("{km:.1}"),
            at = %format_coordinates(&rec.location),
            notes = %rec.notes,
            "{} {}",
            meta.icon,
            meta.label
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = configs::AppConfig::load_and_validate()?;
    let query = match std::env::args().nth(1) {
        Some(kind) => ListQuery { kind: Some(kind), status: None },
        None => ListQuery::default(),
    };
    if query.type_filter() == TypeFilter::Unknown {
        warn!(
            service = "responder",
            event = "unknown_type",
            filter = ?query.kind,
            "filter names no known type; listing will be empty"
        );
    }

    let api = select_api(&cfg.client).await?;
    info!(
        service = "responder",
        event = "start",
        backend = ?api.backend(),
        every_secs = cfg.client.poll_interval_secs,
        "responder polling"
    );

    let every = Duration::from_secs(cfg.client.poll_interval_secs);
    let poller = ListingPoller::spawn(Arc::clone(&api), query, every);
    let mut updates = poller.subscribe();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    error!(service = "responder", event = "poller_stopped", "listing poller exited");
                    break;
                }
                report(&poller.snapshot());
            }
            _ = tokio::signal::ctrl_c() => {
                info!(service = "responder", event = "stop", "received Ctrl+C, stopping");
                break;
            }
        }
    }
    poller.stop();
    Ok(())
}
