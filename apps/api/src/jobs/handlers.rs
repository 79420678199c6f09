//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::{JobFilters, JobPosting, JobQuery};
use crate::matching::{compute_match, require_text, MatchResult};
use crate::state::AppState;

const MAX_TOP_N: usize = 50;

fn default_keyword() -> String {
    "data scientist".to_string()
}

fn default_top_n() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    #[serde(default = "default_keyword")]
    pub keyword: String,
    pub city: Option<String>,
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(flatten)]
    pub filters: JobFilters,
    #[serde(default)]
    pub sort_by_recency: bool,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobPosting>,
}

/// POST /api/jobs
///
/// Searches job providers (through the TTL cache), applies boolean filters,
/// optionally ranks by résumé match, and returns at most `top_n` postings.
pub async fn handle_job_search(
    State(state): State<AppState>,
    Json(request): Json<JobSearchRequest>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let keyword = require_text(&request.keyword, "keyword")?.to_string();

    let query = JobQuery {
        keyword,
        city: request.city.filter(|c| !c.trim().is_empty()),
        filters: request.filters,
        resume: request.resume.filter(|r| !r.trim().is_empty()),
        sort_by_recency: request.sort_by_recency,
        top_n: request.top_n.clamp(1, MAX_TOP_N),
    };

    let jobs = state.jobs.search(&query).await?;
    Ok(Json(JobSearchResponse { jobs }))
}

#[derive(Debug, Deserialize)]
pub struct JobDetailRequest {
    pub resume: String,
    #[serde(default = "default_keyword")]
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    pub job: JobPosting,
    #[serde(rename = "match")]
    pub match_result: MatchResult,
}

/// POST /api/job/:id
///
/// Returns one posting with a full match breakdown against the caller's
/// résumé. 404 when the id is absent from the listing set for the keyword.
pub async fn handle_job_detail(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(request): Json<JobDetailRequest>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let keyword = require_text(&request.keyword, "keyword")?.to_string();

    let job = state.jobs.find(&job_id, &keyword).await?;
    let match_result = compute_match(&request.resume, &job.jd_text, state.scorer.as_ref()).await?;

    Ok(Json(JobDetailResponse { job, match_result }))
}
