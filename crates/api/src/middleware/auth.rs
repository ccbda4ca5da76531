//! Authentication middleware for protected and optionally authenticated routes.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;
use publink_core::access::Requester;
use publink_shared::{Claims, JwtError};

/// The raw bearer token of an authenticated request.
///
/// Kept so it can be forwarded to the publication service.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

fn rejected(err: &JwtError) -> Response {
    match err {
        JwtError::Expired => unauthorized("token_expired", "Token has expired"),
        _ => unauthorized("invalid_token", "Invalid or malformed token"),
    }
}

/// Validates `token` and stores its claims and the token itself in the request.
fn authenticate(state: &AppState, request: &mut Request, token: &str) -> Result<(), Response> {
    let claims = state.jwt_service.validate_token(token).map_err(|e| rejected(&e))?;
    let token = BearerToken(token.to_string());
    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(token);
    Ok(())
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let Some(token) = auth_header.as_deref().and_then(extract_bearer_token) else {
        return unauthorized(
            "missing_token",
            "Authorization header with Bearer token is required",
        );
    };

    match authenticate(&state, &mut request, token) {
        Ok(()) => next.run(request).await,
        Err(response) => response,
    }
}

/// Like [`auth_middleware`], but lets requests without an Authorization
/// header through as anonymous.
///
/// A header that is present but unusable is still rejected with 401 rather
/// than silently downgraded to anonymous.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request.headers().get(AUTHORIZATION) {
        None => return next.run(request).await,
        Some(value) => value.to_str().ok().map(str::to_string),
    };

    let Some(token) = auth_header.as_deref().and_then(extract_bearer_token) else {
        return unauthorized("invalid_token", "Authorization header must carry a Bearer token");
    };

    match authenticate(&state, &mut request, token) {
        Ok(()) => next.run(request).await,
        Err(response) => response,
    }
}

/// Extractor for authenticated user claims.
///
/// Use this in handlers behind [`auth_middleware`]:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user identifier from the claims.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.0.user_id()
    }

    /// Returns the inner claims.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "unauthorized",
                        "message": "Authentication required"
                    })),
                )
            })
    }
}

/// Extractor for routes behind [`optional_auth_middleware`].
///
/// Anonymous when no token was presented.
#[derive(Debug, Clone, Default)]
pub struct MaybeAuth {
    /// Who is asking.
    pub requester: Requester,
    /// The bearer token to forward downstream, if any.
    pub token: Option<String>,
}

impl<S> FromRequestParts<S> for MaybeAuth
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let requester = parts
            .extensions
            .get::<Claims>()
            .map_or_else(Requester::anonymous, Requester::from_claims);
        let token = parts
            .extensions
            .get::<BearerToken>()
            .map(|t| t.0.clone());
        Ok(Self { requester, token })
    }
}
