//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration. Without it, short URLs live in process memory.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Object storage configuration.
    pub storage: StorageSettings,
    /// Publication metadata service configuration.
    pub publication_api: PublicationApiSettings,
    /// Short URL configuration.
    pub short_url: ShortUrlSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for verifying tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Which object storage backend to presign against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// S3-compatible storage.
    S3,
    /// Local filesystem (development only, cannot presign).
    Local,
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage backend.
    pub provider: StorageKind,
    /// Bucket holding publication files.
    #[serde(default)]
    pub bucket: String,
    /// S3 endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// S3 region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 access key ID.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// S3 secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Root directory for the local provider.
    #[serde(default)]
    pub root: Option<String>,
    /// Validity of presigned download URLs in seconds.
    #[serde(default = "default_presign_ttl")]
    pub presign_ttl_secs: u64,
    /// Upper bound for a single presign call in seconds.
    #[serde(default = "default_storage_timeout")]
    pub timeout_secs: u64,
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_presign_ttl() -> u64 {
    900 // 15 minutes
}

fn default_storage_timeout() -> u64 {
    10
}

/// Publication metadata service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicationApiSettings {
    /// Base URL, e.g. `https://api.example.org/publication`.
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_publication_api_timeout")]
    pub timeout_secs: u64,
}

fn default_publication_api_timeout() -> u64 {
    10
}

/// Short URL configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortUrlSettings {
    /// Domain short URLs are composed under, e.g. `https://api.example.org`.
    pub domain: String,
    /// Upper bound for a single store call in seconds.
    #[serde(default = "default_short_url_timeout")]
    pub timeout_secs: u64,
}

fn default_short_url_timeout() -> u64 {
    5
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Later sources override earlier ones: `config/default`, then
    /// `config/{RUN_MODE}`, then `PUBLINK__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("PUBLINK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
