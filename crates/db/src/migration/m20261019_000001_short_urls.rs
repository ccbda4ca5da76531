//! Short URL table.
//!
//! The primary key on `shortened_uri` is what makes allocation atomic: a
//! plain INSERT either claims the key or fails with a unique violation.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SHORT_URLS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS short_urls CASCADE;")
            .await?;
        Ok(())
    }
}

const SHORT_URLS_SQL: &str = r"
-- Short URL mappings, keyed by the full short URI
CREATE TABLE short_urls (
    shortened_uri TEXT PRIMARY KEY,
    long_uri TEXT NOT NULL,
    created_date TIMESTAMPTZ NOT NULL DEFAULT now(),
    expires_date TIMESTAMPTZ NOT NULL,
    CONSTRAINT chk_long_uri_not_blank CHECK (btrim(long_uri) <> ''),
    CONSTRAINT chk_expires_after_created CHECK (expires_date > created_date)
);

-- Index for cleanup of expired mappings
CREATE INDEX idx_short_urls_expires ON short_urls(expires_date);
";
