//! Service layer for SOS requests.
//! - `records`: record store trait with table-store and file-backed implementations.
//! - `sos`: submission, listing, resolution and deletion rules.
//! - `sweeper`: background removal of expired records.

pub mod errors;
pub mod metrics;
pub mod records;
pub mod sos;
pub mod storage;
pub mod sweeper;
#[cfg(test)]
pub mod test_support;

pub use records::RecordStore;
pub use sos::SosService;
