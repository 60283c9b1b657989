mod ai;
mod analytics;
mod config;
mod editors;
mod errors;
mod models;
mod preview;
mod routes;
mod shell;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::gemini::{GeminiClient, MODEL};
use crate::ai::AiGateway;
use crate::analytics::sample_data::SampleMetrics;
use crate::config::{Config, StorageBackend};
use crate::routes::build_router;
use crate::shell::{InFlightFlag, ShellState};
use crate::state::AppState;
use crate::store::credentials::CredentialStore;
use crate::store::slots::{FileSlotStore, MemorySlotStore, RedisSlotStore, SlotStore};
use crate::store::DocumentStore;

const REDIS_KEY_PREFIX: &str = "resume-studio";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid or missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Studio v{}", env!("CARGO_PKG_VERSION"));

    // Initialize slot storage
    let slots = build_slot_store(&config)?;
    info!("Slot storage initialized ({})", slots.backend());

    // Load the document and the AI credential
    let store = DocumentStore::open(slots.clone()).await;
    let credentials = CredentialStore::open(slots, config.gemini_api_key.clone()).await;

    // Initialize AI gateway
    let gemini = GeminiClient::new(&config.gemini_api_base)?;
    info!("AI gateway initialized (model: {MODEL})");

    let state = AppState {
        store: Arc::new(store),
        credentials: Arc::new(credentials),
        shell: Arc::new(Mutex::new(ShellState::default())),
        ai: AiGateway::new(Arc::new(gemini)),
        rewrite_flag: Arc::new(InFlightFlag::default()),
        ats_flag: Arc::new(InFlightFlag::default()),
        metrics: Arc::new(SampleMetrics::new()),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the slot backend named by `STORAGE_BACKEND`.
fn build_slot_store(config: &Config) -> Result<Arc<dyn SlotStore>> {
    let slots: Arc<dyn SlotStore> = match config.storage_backend {
        StorageBackend::File => Arc::new(
            FileSlotStore::open(&config.storage_dir).with_context(|| {
                format!("Cannot open storage dir {}", config.storage_dir.display())
            })?,
        ),
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis backend")?;
            Arc::new(RedisSlotStore::open(url, REDIS_KEY_PREFIX)?)
        }
        StorageBackend::Memory => Arc::new(MemorySlotStore::new()),
    };
    Ok(slots)
}
