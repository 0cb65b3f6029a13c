use std::time::Duration;

use async_trait::async_trait;
use common::types::MessageBody;
use models::api::{ListResponse, RecordResponse};
use models::{ListQuery, SosRecord, SubmitSos, TypeFilter};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::api::{Backend, SosApi};
use crate::error::ClientError;

/// HTTP adapter for the SOS service.
#[derive(Clone)]
pub struct RemoteSosApi {
    http: Client,
    base_url: Url,
}

impl RemoteSosApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(ClientError::transport)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Transport(format!("not a base url: {base_url}")));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::transport)?;
        Ok(Self { http, base_url })
    }

    /// Base URL joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Transport(format!("not a base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
        let status = res.status();
        if status.is_success() {
            return res.json::<T>().await.map_err(ClientError::transport);
        }
        let message = match res.json::<MessageBody>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
        };
        Err(ClientError::from_status(status.as_u16(), message))
    }
}

fn require_id(id: &str) -> Result<&str, ClientError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ClientError::Validation("Missing SOS ID".into()));
    }
    Ok(id)
}

#[async_trait]
impl SosApi for RemoteSosApi {
    fn backend(&self) -> Backend {
        Backend::Remote
    }

    #[instrument(skip(self, input))]
    async fn submit(&self, input: SubmitSos) -> Result<SosRecord, ClientError> {
        input.validate()?;
        let res = self
            .http
            .post(self.endpoint(&["sos"])?)
            .json(&input)
            .send()
            .await
            .map_err(ClientError::transport)?;
        let body: RecordResponse = Self::decode(res).await?;
        Ok(body.data)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery) -> Result<Vec<SosRecord>, ClientError> {
        let mut req = self.http.get(self.endpoint(&["sos"])?);
        if let (TypeFilter::Kind(_) | TypeFilter::Unknown, Some(raw)) =
            (query.type_filter(), query.kind.as_deref())
        {
            req = req.query(&[("type", raw.trim())]);
        }
        let res = req.send().await.map_err(ClientError::transport)?;
        let body: ListResponse = Self::decode(res).await?;
        // the service only lists unresolved records; narrow further here
        let records: Vec<SosRecord> = match query.status {
            Some(status) => body.data.into_iter().filter(|r| r.status == status).collect(),
            None => body.data,
        };
        debug!(count = records.len(), "remote listing");
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn resolve(&self, id: &str) -> Result<SosRecord, ClientError> {
        let id = require_id(id)?;
        let res = self
            .http
            .post(self.endpoint(&["sos", id, "resolve"])?)
            .send()
            .await
            .map_err(ClientError::transport)?;
        let body: RecordResponse = Self::decode(res).await?;
        Ok(body.data)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let id = require_id(id)?;
        let res = self
            .http
            .delete(self.endpoint(&["sos", id])?)
            .send()
            .await
            .map_err(ClientError::transport)?;
        let _: MessageBody = Self::decode(res).await?;
        Ok(())
    }
}
