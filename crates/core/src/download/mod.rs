//! Download link issuance.
//!
//! Ties together publication lookup, the access decision, presigning, and
//! optional shortening into a single fail-fast pipeline.

mod envelope;
mod error;
mod issuer;
mod service;

pub use envelope::{DownloadLinkEnvelope, PRESIGNED_URL_CONTEXT};
pub use error::DownloadError;
pub use issuer::{PresignedLink, PresignedLinkIssuer};
pub use service::DownloadService;
