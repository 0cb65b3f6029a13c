use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::MessageBody;
use models::api::MSG_INTERNAL;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error response rendered as `{ "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(MessageBody::new(self.message))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::Model(m) => match m {
                models::errors::ModelError::Validation(msg) | models::errors::ModelError::Parse(msg) => {
                    Self::bad_request(msg)
                }
            },
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "SOS submission not found"),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            ServiceError::Store(detail) => {
                // details stay in the log, callers get the generic message
                error!(error = %detail, "store failure");
                Self::internal()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("store initialisation failed: {0}")]
    Store(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
