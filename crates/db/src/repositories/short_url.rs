//! Short URL repository for database operations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set, SqlErr};
use tracing::debug;

use publink_core::shortener::{ShortUrlMapping, ShortUrlStore, StoreError};

use crate::entities::short_urls;

/// Postgres-backed short URL store.
#[derive(Debug, Clone)]
pub struct ShortUrlRepository {
    db: Arc<DatabaseConnection>,
}

impl ShortUrlRepository {
    /// Creates a new short URL repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }
}

impl From<short_urls::Model> for ShortUrlMapping {
    fn from(model: short_urls::Model) -> Self {
        Self {
            shortened_uri: model.shortened_uri,
            long_uri: model.long_uri,
            created_date: model.created_date.with_timezone(&Utc),
            expires_date: model.expires_date.with_timezone(&Utc),
        }
    }
}

fn store_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Conflict(detail),
        _ => StoreError::Unavailable(err.to_string()),
    }
}

#[async_trait]
impl ShortUrlStore for ShortUrlRepository {
    async fn put_if_absent(&self, mapping: &ShortUrlMapping) -> Result<(), StoreError> {
        let row = short_urls::ActiveModel {
            shortened_uri: Set(mapping.shortened_uri.clone()),
            long_uri: Set(mapping.long_uri.clone()),
            created_date: Set(mapping.created_date.into()),
            expires_date: Set(mapping.expires_date.into()),
        };

        short_urls::Entity::insert(row)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(store_error)?;

        debug!(shortened_uri = %mapping.shortened_uri, "Inserted short URL");
        Ok(())
    }

    async fn get_by_key(
        &self,
        shortened_uri: &str,
    ) -> Result<Option<ShortUrlMapping>, StoreError> {
        let model = short_urls::Entity::find_by_id(shortened_uri.to_string())
            .one(self.db.as_ref())
            .await
            .map_err(store_error)?;

        Ok(model.map(ShortUrlMapping::from))
    }
}
