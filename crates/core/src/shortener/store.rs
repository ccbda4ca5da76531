//! Key-value store port for short URL mappings.

use async_trait::async_trait;
use thiserror::Error;

use super::types::ShortUrlMapping;

/// Store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A mapping with the same key already exists.
    #[error("key already exists: {0}")]
    Conflict(String),

    /// The store could not complete the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for short URL mappings, keyed by shortened URI.
///
/// Implemented by the db crate; [`super::MemoryShortUrlStore`] backs tests
/// and database-less development.
#[async_trait]
pub trait ShortUrlStore: Send + Sync {
    /// Insert the mapping unless its key is taken.
    ///
    /// Must be a single atomic conditional write; returns
    /// [`StoreError::Conflict`] when the key exists.
    async fn put_if_absent(&self, mapping: &ShortUrlMapping) -> Result<(), StoreError>;

    /// Look up a mapping by shortened URI.
    async fn get_by_key(&self, shortened_uri: &str)
    -> Result<Option<ShortUrlMapping>, StoreError>;
}
