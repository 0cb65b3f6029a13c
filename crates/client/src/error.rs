use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("local store error: {0}")]
    Store(String),
}

impl ClientError {
    /// Map a non-success HTTP status and its `message` body to an error.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::Validation(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Server { status, message },
        }
    }

    pub fn transport<E: std::fmt::Display>(e: E) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<ServiceError> for ClientError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => Self::Validation(m),
            ServiceError::Model(ModelError::Validation(m)) | ServiceError::Model(ModelError::Parse(m)) => {
                Self::Validation(m)
            }
            ServiceError::NotFound(m) => Self::NotFound(m),
            ServiceError::Conflict(m) => Self::Conflict(m),
            ServiceError::Store(m) => Self::Store(m),
        }
    }
}

impl From<ModelError> for ClientError {
    fn from(e: ModelError) -> Self {
        ServiceError::from(e).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_variants() {
        assert_eq!(ClientError::from_status(400, "bad".into()), ClientError::Validation("bad".into()));
        assert_eq!(ClientError::from_status(404, "gone".into()), ClientError::NotFound("gone".into()));
        assert_eq!(ClientError::from_status(409, "no".into()), ClientError::Conflict("no".into()));
        assert!(matches!(ClientError::from_status(500, "x".into()), ClientError::Server { status: 500, .. }));
    }

    #[test]
    fn service_not_found_stays_not_found() {
        let e: ClientError = ServiceError::not_found("SOS submission").into();
        assert!(matches!(e, ClientError::NotFound(_)));
    }
}
