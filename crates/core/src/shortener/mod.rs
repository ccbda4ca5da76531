//! Short URL allocation and resolution.
//!
//! A short URL is `<domain>/download/short/<token>` where the token is a
//! time-ordered UUID. Uniqueness rests solely on the store's atomic
//! put-if-absent; a conflict is reported, never retried.

mod error;
mod memory;
mod service;
mod store;
mod types;

pub use error::ShortUrlError;
pub use memory::MemoryShortUrlStore;
pub use service::{SHORT_PATH, ShortUrlConfig, ShortUrlService};
pub use store::{ShortUrlStore, StoreError};
pub use types::{ShortUrlMapping, ShortenRequest};
