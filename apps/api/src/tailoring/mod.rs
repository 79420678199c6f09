//! Tailoring Orchestrator — LLM rewrite of a résumé bracketed by two match
//! computations, so the caller sees the before/after score movement.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::{compute_match, require_text};
use crate::matching::semantic::SemanticScorer;
use crate::tailoring::prompts::{tailor_system, TAILOR_PROMPT_TEMPLATE};

/// A rewrite shorter than this is treated as a failed tailoring, not a
/// result. Returning a truncated résumé is worse than reporting failure.
pub const MIN_TAILORED_LEN: usize = 100;

fn default_role() -> String {
    "Generic".to_string()
}

fn default_company() -> String {
    "Unknown".to_string()
}

/// One tailoring request, deserialized straight off the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct TailorRequest {
    pub resume: String,
    pub jd: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_company")]
    pub company: String,
    /// When set, the tailored text is also persisted onto this user's row
    /// (best-effort).
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TailorResult {
    pub tailored_text: String,
    pub original_match: u8,
    pub tailored_match: u8,
}

/// Runs the full tailoring pipeline:
/// match original → LLM rewrite → validate → match rewritten.
///
/// The rewrite step has no fallback — a broken rewrite surfaces as
/// `AppError::Tailoring` (and quota exhaustion as `AppError::RateLimited`).
/// Persisting the result onto the user row is best-effort and never fails
/// the operation.
pub async fn tailor(
    db: &PgPool,
    llm: &LlmClient,
    scorer: &dyn SemanticScorer,
    request: &TailorRequest,
) -> Result<TailorResult, AppError> {
    let resume = require_text(&request.resume, "resume")?;
    let jd = require_text(&request.jd, "jd")?;

    let original = compute_match(resume, jd, scorer).await?;

    let prompt = TAILOR_PROMPT_TEMPLATE
        .replace("{role}", &request.role)
        .replace("{company}", &request.company)
        .replace("{resume}", resume)
        .replace("{jd_text}", jd);

    let tailored_text = match llm.call_text(&prompt, &tailor_system()).await {
        Ok(text) => text,
        Err(LlmError::RateLimited { retries }) => {
            warn!("tailoring rate limited after {retries} retries");
            return Err(AppError::RateLimited);
        }
        Err(e) => return Err(AppError::Tailoring(format!("resume rewrite failed: {e}"))),
    };

    validate_tailored(&tailored_text)?;

    let tailored = compute_match(&tailored_text, jd, scorer).await?;

    if let Some(user_id) = request.user_id {
        save_tailored_resume(db, user_id, &tailored_text).await;
    }

    Ok(TailorResult {
        tailored_text,
        original_match: original.blended_score,
        tailored_match: tailored.blended_score,
    })
}

/// Rejects implausibly short rewrites.
pub fn validate_tailored(text: &str) -> Result<(), AppError> {
    let len = text.trim().chars().count();
    if len < MIN_TAILORED_LEN {
        return Err(AppError::Tailoring(format!(
            "rewrite came back with {len} characters (minimum {MIN_TAILORED_LEN})"
        )));
    }
    Ok(())
}

/// Best-effort write of the tailored text onto the user row. Overwritten on
/// every tailoring run, not versioned. Errors are logged, never propagated.
async fn save_tailored_resume(db: &PgPool, user_id: Uuid, tailored_text: &str) {
    let result = sqlx::query("UPDATE users SET tailored_resume = $1 WHERE id = $2")
        .bind(tailored_text)
        .bind(user_id)
        .execute(db)
        .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => {
            warn!("tailored resume not persisted: user {user_id} not found");
        }
        Ok(_) => {}
        Err(e) => warn!("tailored resume not persisted for user {user_id}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_short_rewrite() {
        let err = validate_tailored("Too short to be a resume.").unwrap_err();
        assert!(matches!(err, AppError::Tailoring(_)));
    }

    #[test]
    fn test_validate_rejects_whitespace_padding() {
        let padded = format!("short{}", " ".repeat(200));
        assert!(validate_tailored(&padded).is_err());
    }

    #[test]
    fn test_validate_accepts_plausible_rewrite() {
        let text = "Jane Doe — Senior Data Engineer. Eight years building batch and \
                    streaming pipelines in Python and SQL across fintech and retail.";
        assert!(validate_tailored(text).is_ok());
    }

    #[test]
    fn test_min_length_boundary() {
        let exactly_min = "x".repeat(MIN_TAILORED_LEN);
        assert!(validate_tailored(&exactly_min).is_ok());

        let one_below = "x".repeat(MIN_TAILORED_LEN - 1);
        assert!(validate_tailored(&one_below).is_err());
    }

    #[test]
    fn test_prompt_template_substitution() {
        let prompt = TAILOR_PROMPT_TEMPLATE
            .replace("{role}", "Platform Engineer")
            .replace("{company}", "Acme")
            .replace("{resume}", "RESUME BODY")
            .replace("{jd_text}", "JD BODY");
        assert!(prompt.contains("Platform Engineer at Acme"));
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("JD BODY"));
        assert!(!prompt.contains('{'));
    }
}
