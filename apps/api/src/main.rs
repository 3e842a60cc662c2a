mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;
mod upload;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::orchestrator::Analyzer;
use crate::config::Config;
use crate::extraction::ExtractionPipeline;
use crate::llm_client::{GenerativeProvider, LlmClient};
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (optional, baseline-only without a key)
    let provider: Option<Arc<dyn GenerativeProvider>> = match LlmClient::from_config(&config)
        .context("Failed to build LLM client")?
    {
        Some(llm) => {
            info!("LLM client initialized (model: {})", llm.model());
            Some(Arc::new(llm) as Arc<dyn GenerativeProvider>)
        }
        None => {
            warn!("GOOGLE_API_KEY not set; using baseline keyword analysis only");
            None
        }
    };

    let extractor = ExtractionPipeline::from_config(&config);
    info!(
        "Extraction pipeline ready (ocr: {}, dpi: {}, lang: {})",
        config.ocr_enabled, config.ocr_dpi, config.ocr_lang
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(Analyzer::new(provider)),
        extractor: Arc::new(extractor),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
