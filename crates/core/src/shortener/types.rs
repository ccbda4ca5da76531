//! Short URL domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted short URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlMapping {
    /// Full short URI; the unique key.
    pub shortened_uri: String,
    /// Target URI, returned verbatim on resolve.
    pub long_uri: String,
    /// When the mapping was created.
    pub created_date: DateTime<Utc>,
    /// When the mapping stops resolving.
    pub expires_date: DateTime<Utc>,
}

impl ShortUrlMapping {
    /// Whether the mapping has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_date <= now
    }
}

/// Request body for creating a short URL.
///
/// Both fields are optional at the wire level so that a missing value is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// URI to shorten.
    #[serde(default)]
    pub uri: Option<String>,
    /// When the short URL stops resolving.
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}

impl ShortenRequest {
    /// Build a request from its parts.
    #[must_use]
    pub fn new(uri: impl Into<String>, expires: DateTime<Utc>) -> Self {
        Self {
            uri: Some(uri.into()),
            expires: Some(expires),
        }
    }
}
