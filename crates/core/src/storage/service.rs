//! Presigning service implementation using Apache OpenDAL.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use opendal::{Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Presigned URL for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
    /// HTTP method to use (GET for download).
    pub method: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
}

/// Capability to mint time-bounded download URLs for stored objects.
#[async_trait]
pub trait Presigner: Send + Sync {
    /// Presign a read of `key`, valid for `ttl`.
    ///
    /// When `content_type` is given, the response served through the URL
    /// carries it as `Content-Type`.
    async fn presign_download(
        &self,
        key: &str,
        ttl: Duration,
        content_type: Option<&str>,
    ) -> Result<PresignedUrl, StorageError>;
}

/// Storage service for publication files.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("provider", &self.config.provider.name())
            .field("bucket", &self.config.provider.bucket())
            .finish_non_exhaustive()
    }
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let mut builder = services::S3::default().bucket(bucket).region(region);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint(endpoint);
                }
                if let (Some(key_id), Some(secret)) = (access_key_id, secret_access_key) {
                    builder = builder.access_key_id(key_id).secret_access_key(secret);
                }

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }
}

#[async_trait]
impl Presigner for StorageService {
    async fn presign_download(
        &self,
        key: &str,
        ttl: Duration,
        content_type: Option<&str>,
    ) -> Result<PresignedUrl, StorageError> {
        if key.is_empty() || key.starts_with('/') || key.contains("..") {
            return Err(StorageError::operation(format!("invalid storage key: {key:?}")));
        }

        // The signature's validity window starts when signing begins.
        let expires_at = expiry_from(Utc::now(), ttl)?;

        let mut request = self.operator.presign_read_with(key, ttl);
        if let Some(content_type) = content_type {
            request = request.override_content_type(content_type);
        }
        let presigned = request.await.map_err(StorageError::from)?;

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            expires_at,
        })
    }
}

fn expiry_from(signed_at: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, StorageError> {
    let validity = chrono::Duration::from_std(ttl)
        .map_err(|e| StorageError::operation(format!("invalid presign ttl: {e}")))?;
    Ok(signed_at
        .checked_add_signed(validity)
        .unwrap_or(DateTime::<Utc>::MAX_UTC))
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3_service() -> StorageService {
        let config = StorageConfig::new(StorageProvider::s3(
            "http://localhost:9000",
            "publication-files",
            "access_key",
            "secret_key",
            "us-east-1",
        ));
        StorageService::from_config(config).expect("should create service")
    }

    #[tokio::test]
    async fn test_presign_download_s3() {
        let service = s3_service();
        let before = Utc::now();

        let presigned = service
            .presign_download(
                "6ba7b811-9dad-11d1-80b4-00c04fd430c8",
                Duration::from_secs(900),
                Some("application/pdf"),
            )
            .await
            .expect("s3 presigning is local computation");

        assert!(presigned.url.starts_with("http://localhost:9000/"));
        assert!(presigned.url.contains("6ba7b811-9dad-11d1-80b4-00c04fd430c8"));
        assert!(presigned.url.contains("X-Amz-Signature"));
        assert!(presigned.url.contains("response-content-type"));
        assert_eq!(presigned.method, "GET");
        assert!(presigned.expires_at > before);
    }

    #[tokio::test]
    async fn test_expiry_is_counted_from_signing_start() {
        let service = s3_service();
        let ttl = Duration::from_secs(900);
        let before = Utc::now();

        let presigned = service
            .presign_download("6ba7b811-9dad-11d1-80b4-00c04fd430c8", ttl, None)
            .await
            .expect("s3 presigning is local computation");
        let after = Utc::now();

        let ttl = chrono::Duration::from_std(ttl).unwrap();
        assert!(presigned.expires_at >= before + ttl);
        assert!(presigned.expires_at <= after + ttl);
    }

    #[test]
    fn test_expiry_from_adds_ttl_to_signing_time() {
        let signed_at = Utc::now();
        let expires = expiry_from(signed_at, Duration::from_secs(60)).unwrap();
        assert_eq!(expires - signed_at, chrono::Duration::seconds(60));
    }

    #[tokio::test]
    async fn test_presign_without_content_type_omits_override() {
        let service = s3_service();

        let presigned = service
            .presign_download("6ba7b811-9dad-11d1-80b4-00c04fd430c8", Duration::from_secs(60), None)
            .await
            .expect("s3 presigning is local computation");

        assert!(!presigned.url.contains("response-content-type"));
    }

    #[tokio::test]
    async fn test_presign_rejects_traversal_keys() {
        let service = s3_service();

        for key in ["", "/abs", "../secret"] {
            let result = service
                .presign_download(key, Duration::from_secs(60), None)
                .await;
            assert!(matches!(result, Err(StorageError::Operation(_))));
        }
    }

    #[tokio::test]
    async fn test_local_fs_cannot_presign() {
        let config = StorageConfig::new(StorageProvider::local_fs("./test"));
        let service = StorageService::from_config(config).expect("should create service");

        let result = service
            .presign_download("file", Duration::from_secs(60), None)
            .await;
        assert!(matches!(result, Err(StorageError::PresignNotSupported)));
    }
}
