//! `SeaORM` entity definitions.

pub mod short_urls;
