//! Publication lookup error types.

use thiserror::Error;

use publink_shared::types::PublicationId;

/// Errors from fetching a publication.
#[derive(Debug, Error)]
pub enum PublicationError {
    /// The metadata service has no such publication.
    #[error("publication not found: {0}")]
    NotFound(PublicationId),

    /// The metadata service could not be reached or failed.
    #[error("publication service unavailable: {0}")]
    Unavailable(String),

    /// The metadata service answered with an unparsable document.
    #[error("malformed publication document: {0}")]
    Malformed(String),

    /// The metadata service did not answer in time.
    #[error("publication service timed out")]
    Timeout,
}

impl PublicationError {
    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a malformed document error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
