//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for download links and short URLs
//! - Authentication middleware and extractors
//! - The publication metadata HTTP client
//! - Error responses

pub mod clients;
pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use publink_core::download::DownloadService;
use publink_core::shortener::ShortUrlService;
use publink_shared::JwtService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
    /// Download link pipeline.
    pub downloads: Arc<DownloadService>,
    /// Short URL allocation and resolution.
    pub short_urls: Arc<ShortUrlService>,
}

/// Creates the main application router.
///
/// Short URLs are served from the root so that `{domain}/download/short/{token}`
/// resolves as issued.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .merge(routes::short_urls::public_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
