//! Axum route handlers for résumé upload/retrieval and onboarding.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::state::AppState;
use crate::users::{get_user, save_onboarding, save_resume_text};

#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    pub parsed_resume: String,
}

/// POST /api/upload-resume
///
/// Multipart upload: a required `file` part (.pdf or .txt) and an optional
/// `user_id` part. Extracted text is returned; persistence onto the user row
/// is best-effort.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut parsed: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        // Owned copy: reading a field's body consumes it, so the name must
        // not stay borrowed across that call.
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
                parsed = Some(extract_text(&bytes, &filename)?);
            }
            Some("user_id") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read user_id: {e}")))?;
                user_id = Some(
                    Uuid::parse_str(raw.trim())
                        .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?,
                );
            }
            _ => {}
        }
    }

    let parsed_resume =
        parsed.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;

    if let Some(user_id) = user_id {
        if let Err(e) = save_resume_text(&state.db, user_id, &parsed_resume).await {
            warn!("resume text not persisted for user {user_id}: {e}");
        }
    }

    Ok(Json(UploadResumeResponse { parsed_resume }))
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct StoredResumeResponse {
    pub resume: Option<String>,
    pub tailored_resume: Option<String>,
}

/// GET /api/resume?user_id=...
///
/// Returns the user's stored résumé text and last tailored résumé, if any.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<StoredResumeResponse>, AppError> {
    let user = get_user(&state.db, params.user_id).await?;
    Ok(Json(StoredResumeResponse {
        resume: user.resume_text,
        tailored_resume: user.tailored_resume,
    }))
}

#[derive(Debug, Deserialize)]
pub struct OnboardingRequest {
    pub user_id: Uuid,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct OnboardingResponse {
    pub status: String,
}

/// POST /api/onboarding
pub async fn handle_onboarding(
    State(state): State<AppState>,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<OnboardingResponse>, AppError> {
    save_onboarding(&state.db, request.user_id, &request.data).await?;
    Ok(Json(OnboardingResponse {
        status: "saved".to_string(),
    }))
}
