mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod scoring;
mod skills;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{ChatBackend, OpenAiClient};
use crate::routes::build_router;
use crate::scoring::ResumeScorer;
use crate::skills::SkillExtractor;
use crate::state::AppState;

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

    info!("Starting AI Service v{}", env!("CARGO_PKG_VERSION"));

    // The one remote dependency: injected into both AI-backed components so
    // tests (and degraded mode) can run without it.
    let llm: Arc<dyn ChatBackend> = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        skill_extractor: Arc::new(SkillExtractor::new(llm.clone())),
        resume_scorer: Arc::new(ResumeScorer::new(llm)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
