mod config;
mod documents;
mod errors;
mod extraction;
mod routes;
mod state;
mod storage;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::{Config, S3Settings};
use crate::extraction::ResumeExtractor;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{DisabledStore, ResumeStore, S3ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Compile the extraction engine once; a bad vocabulary fails startup here
    let extractor_config = config.extractor_config()?;
    let extractor = ResumeExtractor::new(&extractor_config)
        .context("Failed to compile extractor configuration")?;
    info!(
        "Extractor ready (date lookahead {}, institute lookback {}, max entries {})",
        extractor_config.date_lookahead,
        extractor_config.institute_lookback,
        extractor_config.max_entries
    );

    // Initialize upload storage (S3 / MinIO when a bucket is configured)
    let store: Arc<dyn ResumeStore> = match &config.s3 {
        Some(s3) => Arc::new(S3ResumeStore::new(build_s3_client(s3).await, &s3.bucket)),
        None => Arc::new(DisabledStore),
    };
    info!("Upload storage: {}", store.backend_name());

    // Build app state
    let state = AppState {
        extractor: Arc::new(extractor),
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.cors_allowed_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
/// Static credentials are used when both keys are set; otherwise the default
/// AWS provider chain applies.
async fn build_s3_client(settings: &S3Settings) -> aws_sdk_s3::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()));

    if let (Some(key_id), Some(secret)) = (&settings.access_key_id, &settings.secret_access_key)
    {
        loader = loader.credentials_provider(Credentials::new(
            key_id,
            secret,
            None,
            None,
            "resume-api-static",
        ));
    }
    if let Some(endpoint) = &settings.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(settings.endpoint.is_some())
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}

/// Permissive when no origins are configured, otherwise an explicit allow-list.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
