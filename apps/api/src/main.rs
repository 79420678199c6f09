mod config;
mod db;
mod errors;
mod extract;
mod interview;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod render;
mod routes;
mod state;
mod tailoring;
mod users;
mod vault;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::jobs::cache::JobCache;
use crate::jobs::fallback::LlmFallbackProvider;
use crate::jobs::providers::{JSearchProvider, JobProvider, RemotiveProvider};
use crate::jobs::JobAggregator;
use crate::llm_client::LlmClient;
use crate::matching::semantic::{KeywordOnlyScorer, LlmSemanticScorer, SemanticScorer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::vault::TempVault;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ascent API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize semantic scorer (LLM-backed by default, keyword-only via
    // ENABLE_SEMANTIC_SCORING=false)
    let scorer: Arc<dyn SemanticScorer> = if config.semantic_scoring {
        Arc::new(LlmSemanticScorer::new(llm.clone()))
    } else {
        info!("Semantic scoring disabled — keyword scorer only");
        Arc::new(KeywordOnlyScorer)
    };

    // Initialize job providers in preference order
    let jobs = Arc::new(build_job_aggregator(&config, &llm));

    // Initialize temp vault and its background sweeper
    let vault = Arc::new(TempVault::new(
        config.vault_dir.clone(),
        config.vault_archive_dir.clone(),
        config.vault_working_expiry,
        config.vault_archive_expiry,
    )?);
    info!(
        "Temp vault at {} (archive: {})",
        config.vault_dir.display(),
        config.vault_archive_dir.is_some()
    );
    spawn_vault_sweeper(vault.clone(), config.vault_sweep_interval);

    // Build app state
    let state = AppState {
        db,
        llm,
        scorer,
        jobs,
        vault,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wires the job aggregator: Remotive always, JSearch when keyed, and the
/// LLM fallback behind both.
fn build_job_aggregator(config: &Config, llm: &LlmClient) -> JobAggregator {
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client");

    let mut providers: Vec<Box<dyn JobProvider>> =
        vec![Box::new(RemotiveProvider::new(http.clone()))];

    if let Some(key) = &config.jsearch_api_key {
        providers.push(Box::new(JSearchProvider::new(http, key.clone())));
    } else {
        info!("JSEARCH_API_KEY not set — JSearch provider disabled");
    }

    JobAggregator::new(
        providers,
        Some(Box::new(LlmFallbackProvider::new(llm.clone()))),
        JobCache::new(config.job_cache_ttl),
        config.score_before_filter,
    )
}

/// Periodic vault sweep. The first tick fires immediately, so expired
/// artifacts from a previous run are cleared at startup.
fn spawn_vault_sweeper(vault: Arc<TempVault>, interval: std::time::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            vault.sweep();
        }
    });
}
