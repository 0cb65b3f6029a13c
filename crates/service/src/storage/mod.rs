//! Storage abstractions for service layer
//!
//! Contains the file-backed map store used by the embedded record store.

pub mod json_map_store;
