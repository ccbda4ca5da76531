//! Storage configuration types.

use std::path::PathBuf;
use std::time::Duration;

use publink_shared::config::{StorageKind, StorageSettings};

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone)]
pub enum StorageProvider {
    /// S3-compatible storage: AWS S3, Cloudflare R2, MinIO.
    S3 {
        /// S3 endpoint URL. `None` uses the AWS default for the region.
        endpoint: Option<String>,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID. `None` falls back to the ambient credential chain.
        access_key_id: Option<String>,
        /// Secret access key.
        secret_access_key: Option<String>,
        /// Region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider with explicit credentials.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: Some(endpoint.into()),
            bucket: bucket.into(),
            access_key_id: Some(access_key_id.into()),
            secret_access_key: Some(secret_access_key.into()),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Presigned download URL validity in seconds (default: 900 = 15 minutes).
    pub presign_ttl_secs: u64,
    /// Upper bound for one presign call in seconds.
    pub timeout_secs: u64,
}

impl StorageConfig {
    /// Default download URL validity: 15 minutes.
    pub const DEFAULT_PRESIGN_TTL: u64 = 900;
    /// Default presign timeout: 10 seconds.
    pub const DEFAULT_TIMEOUT: u64 = 10;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            presign_ttl_secs: Self::DEFAULT_PRESIGN_TTL,
            timeout_secs: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Build from the application settings section.
    ///
    /// # Errors
    ///
    /// Returns an error if a required setting for the chosen provider is missing.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let provider = match settings.provider {
            StorageKind::S3 => {
                if settings.bucket.is_empty() {
                    return Err(StorageError::configuration("storage.bucket is required for s3"));
                }
                StorageProvider::S3 {
                    endpoint: settings.endpoint.clone(),
                    bucket: settings.bucket.clone(),
                    access_key_id: settings.access_key_id.clone(),
                    secret_access_key: settings.secret_access_key.clone(),
                    region: settings.region.clone(),
                }
            }
            StorageKind::Local => StorageProvider::LocalFs {
                root: settings
                    .root
                    .clone()
                    .ok_or_else(|| StorageError::configuration("storage.root is required for local"))?
                    .into(),
            },
        };

        Ok(Self::new(provider)
            .with_presign_ttl(settings.presign_ttl_secs)
            .with_timeout(settings.timeout_secs))
    }

    /// Set presigned download URL validity.
    #[must_use]
    pub fn with_presign_ttl(mut self, secs: u64) -> Self {
        self.presign_ttl_secs = secs;
        self
    }

    /// Set presign timeout.
    #[must_use]
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Presigned download URL validity.
    #[must_use]
    pub fn presign_ttl(&self) -> Duration {
        Duration::from_secs(self.presign_ttl_secs)
    }

    /// Presign timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
