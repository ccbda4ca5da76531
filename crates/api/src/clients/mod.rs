//! HTTP clients for downstream services.

pub mod publication_api;

pub use publication_api::PublicationApiClient;
