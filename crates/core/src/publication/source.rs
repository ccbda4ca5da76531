//! Port for fetching publications from the metadata service.

use async_trait::async_trait;

use publink_shared::types::PublicationId;

use super::error::PublicationError;
use super::types::Publication;

/// Fetch-by-id access to publication metadata.
///
/// Implemented by the API crate's HTTP client. The caller's bearer token is
/// forwarded so the metadata service can apply its own scoped visibility.
#[async_trait]
pub trait PublicationSource: Send + Sync {
    /// Fetch a publication.
    async fn get_publication(
        &self,
        id: &PublicationId,
        auth_token: Option<&str>,
    ) -> Result<Publication, PublicationError>;
}
