//! Short URL error types.

use thiserror::Error;

use publink_shared::AppError;

/// Short URL operation errors.
#[derive(Debug, Error)]
pub enum ShortUrlError {
    /// Missing or unusable input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing the mapping failed (key conflict or store fault).
    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    /// No mapping for the short id.
    #[error("short url not found: {0}")]
    NotFound(String),

    /// Mapping exists but has expired.
    #[error("short url expired: {0}")]
    Gone(String),

    /// Reading from the store failed.
    #[error("short url store unavailable: {0}")]
    Unavailable(String),

    /// The store did not answer in time.
    #[error("short url store timed out")]
    Timeout,
}

impl ShortUrlError {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a transaction failed error.
    #[must_use]
    pub fn transaction_failed(msg: impl Into<String>) -> Self {
        Self::TransactionFailed(msg.into())
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<ShortUrlError> for AppError {
    fn from(err: ShortUrlError) -> Self {
        let message = err.to_string();
        match err {
            ShortUrlError::InvalidArgument(_) => Self::Validation(message),
            ShortUrlError::TransactionFailed(_) => Self::TransactionFailed(message),
            ShortUrlError::NotFound(_) => Self::NotFound(message),
            ShortUrlError::Gone(_) => Self::Gone(message),
            ShortUrlError::Unavailable(_) => Self::ServiceUnavailable(message),
            ShortUrlError::Timeout => Self::GatewayTimeout(message),
        }
    }
}
