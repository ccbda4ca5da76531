//! API route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::{auth_middleware, optional_auth_middleware},
};

pub mod downloads;
pub mod health;
pub mod short_urls;


/// Creates the API router, layering each group with its authentication mode.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Anonymous or authenticated; a bad token is still rejected
    let download_routes = Router::new()
        .merge(downloads::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ));

    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(short_urls::protected_routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(download_routes)
        .merge(protected_routes)
}
