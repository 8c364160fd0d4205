mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::ocr::MistralOcr;
use crate::extraction::storage::CloudinaryStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analysis API v{}", env!("CARGO_PKG_VERSION"));

    if config.mistral_api_key.is_empty() {
        warn!("MISTRAL_API_KEY is not set; provider calls will be rejected at request time");
    }

    let llm = LlmClient::new(
        config.mistral_api_key.clone(),
        config.mistral_chat_url.clone(),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let store = Arc::new(CloudinaryStore::new(&config));
    info!("Blob store client initialized");

    let ocr = Arc::new(MistralOcr::new(&config));
    info!("OCR client initialized (model: {})", extraction::ocr::OCR_MODEL);

    let state = AppState { llm, store, ocr };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
