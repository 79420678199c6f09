use std::sync::Arc;

use sqlx::PgPool;

use crate::jobs::JobAggregator;
use crate::llm_client::LlmClient;
use crate::matching::semantic::SemanticScorer;
use crate::vault::TempVault;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable semantic scorer. Default: LLM-backed with keyword fallback;
    /// swapped to keyword-only via ENABLE_SEMANTIC_SCORING.
    pub scorer: Arc<dyn SemanticScorer>,
    /// Job search aggregator — providers, TTL cache, and ranking.
    pub jobs: Arc<JobAggregator>,
    /// Temp vault shared between request handlers and the background sweeper.
    pub vault: Arc<TempVault>,
}
