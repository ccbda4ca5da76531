//! Short URL routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use publink_core::shortener::ShortenRequest;
use publink_shared::AppError;
use publink_shared::types::ShortUrlToken;

/// Routes that require authentication.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/download/short", post(create_short_url))
}

/// Routes open to anyone holding a short URL, mounted at the root.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/download/short/{token}", get(resolve_short_url))
}

/// Response for short URL creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlResponse {
    /// The allocated short URI.
    pub shortened_uri: String,
}

/// POST `/download/short`
/// Allocate a short URI for a long one.
async fn create_short_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ShortenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mapping = state.short_urls.shorten(payload).await?;

    info!(
        user_id = auth.user_id(),
        shortened_uri = %mapping.shortened_uri,
        "Short URL requested"
    );

    Ok((
        StatusCode::CREATED,
        Json(ShortUrlResponse {
            shortened_uri: mapping.shortened_uri,
        }),
    ))
}

/// GET `/download/short/{token}`
/// Permanently redirect to the long URI.
async fn resolve_short_url(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // Tokens are UUIDs; anything else can never have been issued.
    let token = token
        .parse::<ShortUrlToken>()
        .map_err(|_| AppError::NotFound(format!("short url not found: {token}")))?;

    let long_uri = state.short_urls.resolve_token(token).await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(LOCATION, long_uri)]))
}
