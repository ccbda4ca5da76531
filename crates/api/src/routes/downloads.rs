//! File download link routes.
//!
//! Mounted behind the optional authentication middleware: anonymous callers
//! may fetch public files, authenticated callers are matched against the
//! publication's owner, contributors, and their access rights.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::MaybeAuth};
use publink_shared::AppError;
use publink_shared::types::{FileId, PublicationId};

/// Creates the download routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/download/{publication_id}/files/{file_id}",
            get(download_link),
        )
        .route(
            "/download/{publication_id}/files/{file_id}/redirect",
            get(download_redirect),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for the download link endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    /// Also return a short URI for the link.
    #[serde(default)]
    pub shorten: bool,
}

fn parse_ids(publication_id: &str, file_id: &str) -> Result<(PublicationId, FileId), ApiError> {
    let publication_id = PublicationId::parse(publication_id)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let file_id = file_id
        .parse::<FileId>()
        .map_err(|e| AppError::Validation(format!("invalid file identifier: {e}")))?;
    Ok((publication_id, file_id))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/download/{publication_id}/files/{file_id}`
/// Issue a presigned download link, optionally with a short URI.
async fn download_link(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path((publication_id, file_id)): Path<(String, String)>,
    Query(query): Query<DownloadQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (publication_id, file_id) = parse_ids(&publication_id, &file_id)?;

    let envelope = state
        .downloads
        .download_link(
            &auth.requester,
            &publication_id,
            file_id,
            auth.token.as_deref(),
            query.shorten,
        )
        .await?;

    Ok(Json(envelope))
}

/// GET `/download/{publication_id}/files/{file_id}/redirect`
/// Redirect straight to the presigned URL.
async fn download_redirect(
    State(state): State<AppState>,
    auth: MaybeAuth,
    Path((publication_id, file_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let (publication_id, file_id) = parse_ids(&publication_id, &file_id)?;

    let link = state
        .downloads
        .presigned_link(
            &auth.requester,
            &publication_id,
            file_id,
            auth.token.as_deref(),
        )
        .await?;

    info!(publication_id = %publication_id, file_id = %file_id, "Redirecting to download");
    Ok(Redirect::to(&link.url))
}
