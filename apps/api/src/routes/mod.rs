pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers as interview_handlers;
use crate::jobs::handlers as job_handlers;
use crate::matching::handlers as match_handlers;
use crate::state::AppState;
use crate::tailoring::handlers as tailor_handlers;
use crate::users::handlers as user_handlers;
use crate::vault::handlers as vault_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/match", post(match_handlers::handle_match))
        // Tailoring API
        .route("/api/tailor-resume", post(tailor_handlers::handle_tailor))
        .route("/api/apply-smart", post(tailor_handlers::handle_apply_smart))
        .route(
            "/api/download-resume",
            post(tailor_handlers::handle_download_resume),
        )
        // Jobs API
        .route("/api/jobs", post(job_handlers::handle_job_search))
        .route("/api/job/:id", post(job_handlers::handle_job_detail))
        // Resume storage
        .route(
            "/api/upload-resume",
            post(user_handlers::handle_upload_resume),
        )
        .route("/api/resume", get(user_handlers::handle_get_resume))
        .route("/api/onboarding", post(user_handlers::handle_onboarding))
        // Vault
        .route("/download/:filename", get(vault_handlers::handle_download))
        .route("/api/vault", get(vault_handlers::handle_vault_list))
        // Interview prep
        .route(
            "/api/interview/questions",
            post(interview_handlers::handle_interview_questions),
        )
        .with_state(state)
}
