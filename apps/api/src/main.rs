mod advisory;
mod config;
mod errors;
mod llm_client;
mod presentation;
mod products;
mod routes;
mod state;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisory::affiliate::AffiliateLinker;
use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::products::FileProductStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing OPENAI_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gardening Product Scanner API v{}", env!("CARGO_PKG_VERSION"));
    info!("OpenAI API key loaded: {}", config.masked_api_key());

    // Initialize LLM client
    let model = OpenAiClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.upstream_timeout,
    )
    .context("Failed to build HTTP client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.upstream_timeout
    );

    // Load product list (seeds defaults on first run)
    let products = FileProductStore::open(&config.products_file)
        .await
        .with_context(|| format!("Failed to load {}", config.products_file.display()))?;

    let linker = AffiliateLinker::new(config.affiliate_tag.clone())?;
    if config.affiliate_tag.is_none() {
        info!("AMAZON_ASSOC_TAG not set; affiliate links carry no tag");
    }

    let state = AppState {
        model: Arc::new(model),
        products: Arc::new(products),
        linker,
    };

    let static_dir = config.static_dir.as_deref().filter(|dir| {
        let exists = dir.is_dir();
        if !exists {
            warn!("STATIC_DIR {} does not exist; not serving frontend", dir.display());
        }
        exists
    });
    if let Some(dir) = static_dir {
        info!("Serving frontend from {}", dir.display());
    }

    let app = build_router(state, static_dir)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.allowed_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS for the configured frontend origins.
fn build_cors(origins: &[String]) -> CorsLayer {
    let origins = cors_origins(origins);
    info!("CORS allowed origins: {:?}", origins);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Explicit origins only. Credentials are allowed, so `*` is skipped along with
/// anything that is not a valid header value.
fn cors_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|o| {
            if o.trim() == "*" {
                warn!("Ignoring wildcard CORS origin; list explicit origins instead");
                return None;
            }
            match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin '{o}'");
                    None
                }
            }
        })
        .collect()
}
