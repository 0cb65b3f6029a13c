use async_trait::async_trait;
use models::{ListQuery, SosRecord, SubmitSos};

use crate::error::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Remote,
    Local,
}

/// Operations shared by the remote and local backends. Both validate input
/// the same way, return listings newest first and report unknown ids as
/// `ClientError::NotFound`.
#[async_trait]
pub trait SosApi: Send + Sync {
    fn backend(&self) -> Backend;

    async fn submit(&self, input: SubmitSos) -> Result<SosRecord, ClientError>;

    async fn list(&self, query: &ListQuery) -> Result<Vec<SosRecord>, ClientError>;

    async fn resolve(&self, id: &str) -> Result<SosRecord, ClientError>;

    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}
