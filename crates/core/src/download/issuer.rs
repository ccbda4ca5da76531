//! Presigned link issuer.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use super::error::DownloadError;
use crate::storage::{Presigner, StorageConfig};

/// A time-bounded download URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedLink {
    /// The presigned URL.
    pub url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Mints presigned links with a process-wide validity.
pub struct PresignedLinkIssuer {
    presigner: Arc<dyn Presigner>,
    validity: Duration,
    timeout: Duration,
}

impl std::fmt::Debug for PresignedLinkIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresignedLinkIssuer")
            .field("validity", &self.validity)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl PresignedLinkIssuer {
    /// Create an issuer.
    #[must_use]
    pub fn new(presigner: Arc<dyn Presigner>, validity: Duration, timeout: Duration) -> Self {
        Self {
            presigner,
            validity,
            timeout,
        }
    }

    /// Create an issuer using the validity and timeout from `config`.
    #[must_use]
    pub fn from_config(presigner: Arc<dyn Presigner>, config: &StorageConfig) -> Self {
        Self::new(presigner, config.presign_ttl(), config.timeout())
    }

    /// Validity of issued links.
    #[must_use]
    pub const fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a link for `storage_key`.
    ///
    /// `mime_type` is passed to storage only when present.
    ///
    /// # Errors
    ///
    /// Returns `ServiceUnavailable` if storage fails and `Timeout` if it
    /// does not answer in time.
    pub async fn issue(
        &self,
        storage_key: &str,
        mime_type: Option<&str>,
    ) -> Result<PresignedLink, DownloadError> {
        let presign = self
            .presigner
            .presign_download(storage_key, self.validity, mime_type);

        match tokio::time::timeout(self.timeout, presign).await {
            Ok(Ok(presigned)) => {
                debug!(storage_key, expires = %presigned.expires_at, "Presigned download URL");
                Ok(PresignedLink {
                    url: presigned.url,
                    expires_at: presigned.expires_at,
                })
            }
            Ok(Err(e)) => {
                error!(error = %e, storage_key, "Failed to presign download URL");
                Err(DownloadError::service_unavailable(e.to_string()))
            }
            Err(_) => {
                error!(timeout = ?self.timeout, storage_key, "Presign timed out");
                Err(DownloadError::Timeout("object storage"))
            }
        }
    }
}
