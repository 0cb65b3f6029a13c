pub mod service;

pub use service::{sort_newest_first, SosService};
