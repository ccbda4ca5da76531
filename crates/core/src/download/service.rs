//! Download service implementation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use publink_shared::types::{FileId, PublicationId};

use super::envelope::DownloadLinkEnvelope;
use super::error::DownloadError;
use super::issuer::{PresignedLink, PresignedLinkIssuer};
use crate::access::{AccessDecision, Requester, decide};
use crate::publication::{PublicationError, PublicationSource};
use crate::shortener::{ShortUrlService, ShortenRequest};

/// Issues download links for publication files.
pub struct DownloadService {
    publications: Arc<dyn PublicationSource>,
    issuer: PresignedLinkIssuer,
    short_urls: Arc<ShortUrlService>,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl DownloadService {
    /// Create a new download service.
    #[must_use]
    pub fn new(
        publications: Arc<dyn PublicationSource>,
        issuer: PresignedLinkIssuer,
        short_urls: Arc<ShortUrlService>,
    ) -> Self {
        Self {
            publications,
            issuer,
            short_urls,
        }
    }

    /// Issue a presigned link for one file, if `requester` may download it.
    ///
    /// `auth_token` is forwarded to the publication service.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the publication or file is missing or access is denied
    /// - `ServiceUnavailable`, `BadGateway`, or `Timeout` on upstream failure
    pub async fn presigned_link(
        &self,
        requester: &Requester,
        publication_id: &PublicationId,
        file_id: FileId,
        auth_token: Option<&str>,
    ) -> Result<PresignedLink, DownloadError> {
        let publication = self
            .publications
            .get_publication(publication_id, auth_token)
            .await
            .inspect_err(|e| {
                if matches!(e, PublicationError::NotFound(_)) {
                    debug!(publication_id = %publication_id, "Publication not found");
                } else {
                    error!(error = %e, publication_id = %publication_id, "Failed to fetch publication");
                }
            })?;

        let file = match decide(requester, &publication, file_id) {
            AccessDecision::Allow(file) => file,
            AccessDecision::Deny(reason) => {
                if reason.is_data_fault() {
                    warn!(
                        publication_id = %publication_id,
                        file_id = %file_id,
                        reason = reason.as_str(),
                        "Publication has inconsistent file artifacts"
                    );
                } else {
                    debug!(
                        publication_id = %publication_id,
                        file_id = %file_id,
                        reason = reason.as_str(),
                        anonymous = requester.is_anonymous(),
                        "Download denied"
                    );
                }
                return Err(DownloadError::not_found(format!(
                    "file {file_id} in publication {publication_id}"
                )));
            }
        };

        let link = self
            .issuer
            .issue(&file.storage_key(), file.mime_type.as_deref())
            .await?;

        info!(
            publication_id = %publication_id,
            file_id = %file_id,
            expires = %link.expires_at,
            "Download link issued"
        );
        Ok(link)
    }

    /// Issue a download link envelope, optionally with a short URI.
    ///
    /// The short URI expires together with the presigned link.
    ///
    /// # Errors
    ///
    /// As [`Self::presigned_link`], plus `Internal` if shortening fails after
    /// presigning succeeded. No partial envelope is returned.
    pub async fn download_link(
        &self,
        requester: &Requester,
        publication_id: &PublicationId,
        file_id: FileId,
        auth_token: Option<&str>,
        shorten: bool,
    ) -> Result<DownloadLinkEnvelope, DownloadError> {
        let link = self
            .presigned_link(requester, publication_id, file_id, auth_token)
            .await?;

        if !shorten {
            return Ok(DownloadLinkEnvelope::new(link));
        }

        let request = ShortenRequest::new(link.url.clone(), link.expires_at);
        let mapping = self.short_urls.shorten(request).await.map_err(|e| {
            error!(error = %e, publication_id = %publication_id, "Failed to shorten download link");
            DownloadError::internal(format!("shortening failed: {e}"))
        })?;

        Ok(DownloadLinkEnvelope::new(link).with_shortened_version(mapping.shortened_uri))
    }
}
