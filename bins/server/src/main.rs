//! Publink API Server
//!
//! Main entry point for the Publink download link service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use publink_api::{AppState, clients::PublicationApiClient, create_router};
use publink_core::download::{DownloadService, PresignedLinkIssuer};
use publink_core::shortener::{MemoryShortUrlStore, ShortUrlConfig, ShortUrlService, ShortUrlStore};
use publink_core::storage::{StorageConfig, StorageService};
use publink_db::{ShortUrlRepository, connect_with_pool};
use publink_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; LOG_FORMAT=json for structured output
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "publink=debug,tower_http=debug".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: i64::try_from(config.jwt.access_token_expiry_secs / 60)
            .unwrap_or(i64::MAX),
    };
    let jwt_service = JwtService::new(jwt_config);

    // Object storage
    let storage_config = StorageConfig::from_settings(&config.storage)?;
    let storage = StorageService::from_config(storage_config.clone())?;
    info!(
        provider = storage.provider_name(),
        bucket = storage.bucket(),
        presign_ttl_secs = storage_config.presign_ttl_secs,
        "Storage configured"
    );
    let issuer = PresignedLinkIssuer::from_config(Arc::new(storage), &storage_config);

    // Short URL store
    let store: Arc<dyn ShortUrlStore> = if let Some(database) = &config.database {
        let db = connect_with_pool(
            &database.url,
            database.max_connections,
            database.min_connections,
        )
        .await?;
        info!("Connected to database");
        Arc::new(ShortUrlRepository::new(db))
    } else {
        warn!("No database configured; short URLs are kept in memory and lost on restart");
        Arc::new(MemoryShortUrlStore::new())
    };
    let short_urls = Arc::new(ShortUrlService::new(
        store,
        ShortUrlConfig::new(&config.short_url.domain)
            .with_timeout(Duration::from_secs(config.short_url.timeout_secs)),
    ));

    // Publication metadata service
    let publications = PublicationApiClient::new(
        &config.publication_api.base_url,
        Duration::from_secs(config.publication_api.timeout_secs),
    )?;
    info!(base_url = %config.publication_api.base_url, "Publication API configured");

    // Create application state
    let state = AppState {
        jwt_service: Arc::new(jwt_service),
        downloads: Arc::new(DownloadService::new(
            Arc::new(publications),
            issuer,
            short_urls.clone(),
        )),
        short_urls,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
