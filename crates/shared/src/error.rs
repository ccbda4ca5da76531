//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure kind a request can end in. The HTTP layer maps these to
/// status codes via [`AppError::status_code`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied where disclosing existence is acceptable.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource existed but is no longer valid.
    #[error("Gone: {0}")]
    Gone(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persisting a record failed (uniqueness conflict or storage fault).
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Downstream dependency could not be reached.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Downstream dependency answered with something unusable.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Downstream dependency did not answer in time.
    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Gone(_) => 410,
            Self::Validation(_) => 400,
            Self::TransactionFailed(_) | Self::Internal(_) => 500,
            Self::BadGateway(_) => 502,
            Self::ServiceUnavailable(_) => 503,
            Self::GatewayTimeout(_) => 504,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Gone(_) => "GONE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::TransactionFailed(_) => "TRANSACTION_FAILED",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::BadGateway(_) => "BAD_GATEWAY",
            Self::GatewayTimeout(_) => "GATEWAY_TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
