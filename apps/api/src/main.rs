mod assistant;
mod config;
mod dashboard;
mod db;
mod errors;
mod llm_client;
mod models;
mod preferences;
mod real_estate;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::{LanguageModel, LlmClient};
use crate::real_estate::analysis::LlmAnalysisProvider;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{KvStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Aura API v{}", env!("CARGO_PKG_VERSION"));

    // Settings and conversations: PostgreSQL when configured, memory otherwise
    let store: Arc<dyn KvStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            info!("DATABASE_URL not set; settings and history are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize LLM client
    let llm: Arc<dyn LanguageModel> = Arc::new(LlmClient::new(
        config.anthropic_api_key.clone(),
        config.llm_timeout(),
    )?);
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    let analysis = Arc::new(LlmAnalysisProvider::new(llm.clone(), config.llm_timeout()));

    let state = AppState::new(llm, analysis, store, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
