//! Presigned download URLs using Apache OpenDAL.
//!
//! This module provides vendor-agnostic presigning with support for:
//! - S3-compatible: AWS S3, Cloudflare R2, MinIO
//! - Local filesystem (development only, cannot presign)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.presign_read_with("key", duration)                            │
//! │   .override_content_type("application/pdf")                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{PresignedUrl, Presigner, StorageService};
