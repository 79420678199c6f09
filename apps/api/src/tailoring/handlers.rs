//! Axum route handlers for tailoring, smart-apply, and résumé export.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::require_text;
use crate::render::text_to_pdf_bytes;
use crate::state::AppState;
use crate::tailoring::{tailor, TailorRequest};

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub tailored_resume: String,
    pub original_match: u8,
    pub tailored_match: u8,
}

/// POST /api/tailor-resume
///
/// Rewrites the résumé for a specific role/company and reports the match
/// score before and after the rewrite.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    let result = tailor(&state.db, &state.llm, state.scorer.as_ref(), &request).await?;

    Ok(Json(TailorResponse {
        tailored_resume: result.tailored_text,
        original_match: result.original_match,
        tailored_match: result.tailored_match,
    }))
}

#[derive(Debug, Serialize)]
pub struct ApplySmartResponse {
    pub status: String,
    /// Vault filename handle — pass to GET /download/:filename.
    pub file: String,
    pub original_match: u8,
    pub tailored_match: u8,
}

/// POST /api/apply-smart
///
/// Tailors the résumé, renders it to PDF, and stores the artifact in the
/// temp vault for later download.
pub async fn handle_apply_smart(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<ApplySmartResponse>, AppError> {
    let result = tailor(&state.db, &state.llm, state.scorer.as_ref(), &request).await?;

    let pdf = text_to_pdf_bytes(&result.tailored_text)?;
    let file = state
        .vault
        .store(&pdf, &request.role, &request.company, "resume")?;

    Ok(Json(ApplySmartResponse {
        status: "resume tailored and stored".to_string(),
        file,
        original_match: result.original_match,
        tailored_match: result.tailored_match,
    }))
}

fn default_file_name() -> String {
    "resume".to_string()
}

#[derive(Debug, Deserialize)]
pub struct DownloadResumeRequest {
    pub resume_text: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

/// POST /api/download-resume
///
/// Renders arbitrary résumé text to PDF and streams it back without storing.
pub async fn handle_download_resume(
    Json(request): Json<DownloadResumeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let text = require_text(&request.resume_text, "resume_text")?;
    let pdf = text_to_pdf_bytes(text)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.pdf\"", request.file_name),
            ),
        ],
        pdf,
    ))
}
