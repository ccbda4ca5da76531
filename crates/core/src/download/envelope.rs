//! Response envelope for an issued download link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::issuer::PresignedLink;

/// Schema identifier carried in every envelope.
pub const PRESIGNED_URL_CONTEXT: &str = "https://publink.dev/context/presigned-url.json";

/// JSON body returned when a download link is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLinkEnvelope {
    /// Fixed schema identifier.
    #[serde(rename = "@context")]
    pub context: String,
    /// The presigned URL.
    pub id: String,
    /// Same URL under its legacy field name.
    pub presigned_download_url: String,
    /// When the URL stops working.
    pub expires: DateTime<Utc>,
    /// Short URI pointing at `id`, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortened_version: Option<String>,
}

impl DownloadLinkEnvelope {
    /// Wrap a presigned link.
    #[must_use]
    pub fn new(link: PresignedLink) -> Self {
        Self {
            context: PRESIGNED_URL_CONTEXT.to_string(),
            id: link.url.clone(),
            presigned_download_url: link.url,
            expires: link.expires_at,
            shortened_version: None,
        }
    }

    /// Attach the short URI.
    #[must_use]
    pub fn with_shortened_version(mut self, shortened_uri: impl Into<String>) -> Self {
        self.shortened_version = Some(shortened_uri.into());
        self
    }
}
