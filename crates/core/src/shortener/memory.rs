//! In-process short URL store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::store::{ShortUrlStore, StoreError};
use super::types::ShortUrlMapping;

/// Short URL store held in process memory.
///
/// Mappings are lost on restart and not shared between instances, so this
/// is only suitable for single-node development and tests.
#[derive(Debug, Default)]
pub struct MemoryShortUrlStore {
    mappings: Mutex<HashMap<String, ShortUrlMapping>>,
}

impl MemoryShortUrlStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.lock().map_or(0, |m| m.len())
    }

    /// Whether the store holds no mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ShortUrlStore for MemoryShortUrlStore {
    async fn put_if_absent(&self, mapping: &ShortUrlMapping) -> Result<(), StoreError> {
        let mut mappings = self
            .mappings
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if mappings.contains_key(&mapping.shortened_uri) {
            return Err(StoreError::Conflict(mapping.shortened_uri.clone()));
        }
        mappings.insert(mapping.shortened_uri.clone(), mapping.clone());
        Ok(())
    }

    async fn get_by_key(
        &self,
        shortened_uri: &str,
    ) -> Result<Option<ShortUrlMapping>, StoreError> {
        let mappings = self
            .mappings
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(mappings.get(shortened_uri).cloned())
    }
}
