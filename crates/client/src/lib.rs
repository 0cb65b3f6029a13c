//! Client-side access to SOS requests.
//!
//! `SosApi` is the single interface used by the submission form and the
//! responder view. `select_api` decides once, from configuration, whether it
//! talks to the remote HTTP service or to a local file-backed store.

pub mod api;
pub mod error;
pub mod local;
pub mod poller;
pub mod remote;
pub mod select;

pub use api::{Backend, SosApi};
pub use error::ClientError;
pub use local::LocalSosApi;
pub use poller::{ListingPoller, Snapshot};
pub use remote::RemoteSosApi;
pub use select::select_api;
