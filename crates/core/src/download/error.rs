//! Download pipeline error types.

use thiserror::Error;

use publink_shared::AppError;

use crate::publication::PublicationError;

/// Download operation errors.
///
/// Access denials are folded into `NotFound` so callers cannot tell a
/// restricted file from a missing one.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Publication or file not found, or access denied.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed request input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A downstream service could not be reached or failed.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A downstream service answered with something unusable.
    #[error("bad gateway: {0}")]
    BadGateway(String),

    /// A downstream service did not answer in time.
    #[error("timed out waiting for {0}")]
    Timeout(&'static str),

    /// A later pipeline step failed after earlier ones succeeded.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DownloadError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a service unavailable error.
    #[must_use]
    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<PublicationError> for DownloadError {
    fn from(err: PublicationError) -> Self {
        match err {
            PublicationError::NotFound(id) => Self::NotFound(format!("publication {id}")),
            PublicationError::Unavailable(msg) => Self::ServiceUnavailable(msg),
            PublicationError::Malformed(msg) => Self::BadGateway(msg),
            PublicationError::Timeout => Self::Timeout("publication service"),
        }
    }
}

impl From<DownloadError> for AppError {
    fn from(err: DownloadError) -> Self {
        let message = err.to_string();
        match err {
            DownloadError::NotFound(_) => Self::NotFound(message),
            DownloadError::InvalidInput(_) => Self::Validation(message),
            DownloadError::ServiceUnavailable(_) => Self::ServiceUnavailable(message),
            DownloadError::BadGateway(_) => Self::BadGateway(message),
            DownloadError::Timeout(_) => Self::GatewayTimeout(message),
            DownloadError::Internal(_) => Self::Internal(message),
        }
    }
}
