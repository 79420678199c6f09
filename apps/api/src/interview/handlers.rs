//! Axum route handler for interview question generation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::generate_questions;
use crate::matching::require_text;
use crate::state::AppState;

fn default_round() -> String {
    "HR".to_string()
}

#[derive(Debug, Deserialize)]
pub struct InterviewRequest {
    pub resume: String,
    pub jd: String,
    #[serde(default = "default_round")]
    pub round: String,
}

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub round: String,
    pub questions: Vec<String>,
    /// "llm" or "preset" — whether the questions were tailored or canned.
    pub source: &'static str,
}

/// POST /api/interview/questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    let resume = require_text(&request.resume, "resume")?;
    let jd = require_text(&request.jd, "jd")?;

    let (questions, source) = generate_questions(&state.llm, resume, jd, &request.round).await;

    Ok(Json(InterviewResponse {
        round: request.round,
        questions,
        source: source.as_str(),
    }))
}
