//! Axum route handlers for the Match API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::compute_match;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume: String,
    pub jd: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    /// Keyword overlap score, reported under its user-facing ATS name.
    pub ats_score: u8,
    pub semantic_score: u8,
    pub blended_score: u8,
    pub explanation: String,
}

/// POST /api/match
///
/// Scores a résumé against a job description. Both fields are required and
/// must be non-empty after trimming.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let result = compute_match(&request.resume, &request.jd, state.scorer.as_ref()).await?;

    Ok(Json(MatchResponse {
        ats_score: result.keyword_score,
        semantic_score: result.semantic_score,
        blended_score: result.blended_score,
        explanation: result.explanation,
    }))
}
