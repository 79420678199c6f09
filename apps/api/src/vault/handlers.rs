//! Axum route handlers for vault downloads and listing.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::vault::ArtifactEntry;

#[derive(Debug, Serialize)]
pub struct VaultListResponse {
    pub files: Vec<ArtifactEntry>,
}

/// GET /download/:filename
///
/// Streams a previously stored artifact. Missing artifacts are a 404 —
/// never an empty body.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = state.vault.load(&filename)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

/// GET /api/vault
///
/// Lists working-directory artifacts, most recent first.
pub async fn handle_vault_list(
    State(state): State<AppState>,
) -> Result<Json<VaultListResponse>, AppError> {
    let files = state.vault.list()?;
    Ok(Json(VaultListResponse { files }))
}
