//! Short URL service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use url::Url;

use publink_shared::types::ShortUrlToken;

use super::error::ShortUrlError;
use super::store::{ShortUrlStore, StoreError};
use super::types::{ShortUrlMapping, ShortenRequest};

/// Path segment between the domain and the token.
pub const SHORT_PATH: &str = "download/short";

/// Short URL service configuration.
#[derive(Debug, Clone)]
pub struct ShortUrlConfig {
    /// Domain short URLs are composed under, without trailing slash.
    pub domain: String,
    /// Upper bound for a single store call.
    pub timeout: Duration,
}

impl ShortUrlConfig {
    /// Default store timeout: 5 seconds.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a config for `domain` with the default timeout.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            domain: domain.trim_end_matches('/').to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set the store timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Allocates and resolves short URLs.
pub struct ShortUrlService {
    store: Arc<dyn ShortUrlStore>,
    config: ShortUrlConfig,
}

impl std::fmt::Debug for ShortUrlService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortUrlService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ShortUrlService {
    /// Create a new short URL service.
    #[must_use]
    pub fn new(store: Arc<dyn ShortUrlStore>, config: ShortUrlConfig) -> Self {
        Self { store, config }
    }

    /// Compose the short URI for a token.
    #[must_use]
    pub fn short_uri_for(&self, token: ShortUrlToken) -> String {
        format!("{}/{SHORT_PATH}/{token}", self.config.domain)
    }

    /// Allocate a short URI for `request.uri`, valid until `request.expires`.
    ///
    /// The same long URI may be shortened any number of times; each call
    /// yields a fresh key.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the URI is missing, blank, or not absolute, or
    ///   if the expiry is missing or not in the future
    /// - `TransactionFailed` if the key is taken or the write fails
    /// - `Timeout` if the store does not answer in time
    pub async fn shorten(&self, request: ShortenRequest) -> Result<ShortUrlMapping, ShortUrlError> {
        self.shorten_at(request, Utc::now()).await
    }

    /// [`Self::shorten`] against an explicit clock.
    pub async fn shorten_at(
        &self,
        request: ShortenRequest,
        now: DateTime<Utc>,
    ) -> Result<ShortUrlMapping, ShortUrlError> {
        let (long_uri, expires_date) = validate(request, now)?;

        let mapping = ShortUrlMapping {
            shortened_uri: self.short_uri_for(ShortUrlToken::new()),
            long_uri,
            created_date: now,
            expires_date,
        };

        match tokio::time::timeout(self.config.timeout, self.store.put_if_absent(&mapping)).await {
            Ok(Ok(())) => {
                info!(
                    shortened_uri = %mapping.shortened_uri,
                    expires = %mapping.expires_date,
                    "Short URL created"
                );
                Ok(mapping)
            }
            Ok(Err(StoreError::Conflict(key))) => {
                warn!(shortened_uri = %key, "Short URL key collision");
                Err(ShortUrlError::transaction_failed(format!("key already exists: {key}")))
            }
            Ok(Err(StoreError::Unavailable(msg))) => {
                error!(error = %msg, "Failed to persist short URL");
                Err(ShortUrlError::transaction_failed(msg))
            }
            Err(_) => {
                error!(timeout = ?self.config.timeout, "Short URL store timed out on write");
                Err(ShortUrlError::Timeout)
            }
        }
    }

    /// Resolve a full short URI to its long URI.
    ///
    /// # Errors
    ///
    /// - `NotFound` naming the short id if no mapping exists
    /// - `Gone` if the mapping has expired
    /// - `Unavailable` or `Timeout` if the store fails
    pub async fn resolve(&self, shortened_uri: &str) -> Result<String, ShortUrlError> {
        self.resolve_at(shortened_uri, Utc::now()).await
    }

    /// Resolve the short URI composed from `token`.
    pub async fn resolve_token(&self, token: ShortUrlToken) -> Result<String, ShortUrlError> {
        self.resolve(&self.short_uri_for(token)).await
    }

    /// [`Self::resolve`] against an explicit clock.
    pub async fn resolve_at(
        &self,
        shortened_uri: &str,
        now: DateTime<Utc>,
    ) -> Result<String, ShortUrlError> {
        let short_id = short_id_of(shortened_uri);

        let mapping = match tokio::time::timeout(
            self.config.timeout,
            self.store.get_by_key(shortened_uri),
        )
        .await
        {
            Ok(Ok(Some(mapping))) => mapping,
            Ok(Ok(None)) => {
                debug!(short_id, "Short URL not found");
                return Err(ShortUrlError::NotFound(short_id.to_string()));
            }
            Ok(Err(err)) => {
                error!(error = %err, short_id, "Failed to read short URL");
                return Err(ShortUrlError::unavailable(err.to_string()));
            }
            Err(_) => {
                error!(timeout = ?self.config.timeout, short_id, "Short URL store timed out on read");
                return Err(ShortUrlError::Timeout);
            }
        };

        if mapping.is_expired_at(now) {
            debug!(short_id, expired = %mapping.expires_date, "Short URL expired");
            return Err(ShortUrlError::Gone(short_id.to_string()));
        }

        Ok(mapping.long_uri)
    }
}

fn validate(
    request: ShortenRequest,
    now: DateTime<Utc>,
) -> Result<(String, DateTime<Utc>), ShortUrlError> {
    // Stored and later returned exactly as received; trimming is for the blank check only.
    let uri = request
        .uri
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ShortUrlError::invalid_argument("uri is required"))?;

    Url::parse(&uri)
        .map_err(|e| ShortUrlError::invalid_argument(format!("uri is not absolute: {e}")))?;

    let expires = request
        .expires
        .ok_or_else(|| ShortUrlError::invalid_argument("expires is required"))?;

    if expires <= now {
        return Err(ShortUrlError::invalid_argument("expires must be in the future"));
    }

    Ok((uri, expires))
}

fn short_id_of(shortened_uri: &str) -> &str {
    shortened_uri
        .rsplit('/')
        .next()
        .unwrap_or(shortened_uri)
}
