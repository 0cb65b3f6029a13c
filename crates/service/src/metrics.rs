use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static SUBMITTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("sos_submitted_total", "Total SOS requests submitted")
        .expect("register sos_submitted_total")
});

pub static RESOLVED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("sos_resolved_total", "Total SOS requests resolved")
        .expect("register sos_resolved_total")
});

pub static DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("sos_deleted_total", "Total SOS requests deleted")
        .expect("register sos_deleted_total")
});

pub static EXPIRED_PURGED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("sos_expired_purged_total", "Total expired SOS requests removed by the sweeper")
        .expect("register sos_expired_purged_total")
});

/// Touch every counter so they show up in the first scrape.
pub fn init() {
    Lazy::force(&SUBMITTED_TOTAL);
    Lazy::force(&RESOLVED_TOTAL);
    Lazy::force(&DELETED_TOTAL);
    Lazy::force(&EXPIRED_PURGED_TOTAL);
}

/// Render the default registry in the Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    let mut buf = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
