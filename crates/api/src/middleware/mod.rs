//! Request middleware and extractors.

pub mod auth;

pub use auth::{AuthUser, BearerToken, MaybeAuth, auth_middleware, optional_auth_middleware};
