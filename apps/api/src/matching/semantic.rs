//! Semantic scorer — LLM-provided 0–100 fit estimate with keyword fallback.
//!
//! Pluggable behind the `SemanticScorer` trait so matching logic never knows
//! which backend produced the number. `AppState` holds an
//! `Arc<dyn SemanticScorer>`, swapped at startup via `ENABLE_SEMANTIC_SCORING`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::keyword::score_keywords;
use crate::matching::prompts::{SEMANTIC_SCORE_SYSTEM, SEMANTIC_SCORE_TEMPLATE};

/// Produces the semantic half of a match score.
#[async_trait]
pub trait SemanticScorer: Send + Sync {
    async fn score(&self, resume: &str, jd: &str) -> Result<u8, AppError>;
}

/// LLM-backed scorer. Parse failures and provider failures silently degrade
/// to the keyword score — one level deep, exactly once. Rate limiting does
/// NOT degrade: a fabricated score under quota exhaustion would mislead the
/// user, so it surfaces as `AppError::RateLimited`.
pub struct LlmSemanticScorer {
    llm: LlmClient,
}

impl LlmSemanticScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SemanticScorer for LlmSemanticScorer {
    async fn score(&self, resume: &str, jd: &str) -> Result<u8, AppError> {
        let prompt = SEMANTIC_SCORE_TEMPLATE
            .replace("{resume}", resume)
            .replace("{jd_text}", jd);

        match self.llm.call_text(&prompt, SEMANTIC_SCORE_SYSTEM).await {
            Ok(text) => match parse_score(&text) {
                Some(score) => Ok(score),
                None => {
                    tracing::warn!("semantic scorer returned no number, falling back to keywords");
                    Ok(score_keywords(resume, jd))
                }
            },
            Err(LlmError::RateLimited { retries }) => {
                tracing::warn!("semantic scorer rate limited after {retries} retries");
                Err(AppError::RateLimited)
            }
            Err(e) => {
                tracing::warn!("semantic scorer failed ({e}), falling back to keywords");
                Ok(score_keywords(resume, jd))
            }
        }
    }
}

/// Keyword-only backend, used when semantic scoring is disabled by config.
pub struct KeywordOnlyScorer;

#[async_trait]
impl SemanticScorer for KeywordOnlyScorer {
    async fn score(&self, resume: &str, jd: &str) -> Result<u8, AppError> {
        Ok(score_keywords(resume, jd))
    }
}

/// Extracts the first run of ASCII digits from LLM output, clamped to 100.
/// Returns `None` when no digits are present — the caller decides the
/// fallback, this function never guesses.
pub fn parse_score(text: &str) -> Option<u8> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse::<u32>().ok().map(|n| n.min(100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(parse_score("87"), Some(87));
    }

    #[test]
    fn test_parse_number_with_surrounding_text() {
        assert_eq!(parse_score("I'd say 72% fit overall."), Some(72));
    }

    #[test]
    fn test_parse_takes_first_digit_run() {
        assert_eq!(parse_score("60 to 70"), Some(60));
    }

    #[test]
    fn test_parse_clamps_to_100() {
        assert_eq!(parse_score("150"), Some(100));
    }

    #[test]
    fn test_parse_no_digits_is_none() {
        assert_eq!(parse_score("excellent fit"), None);
        assert_eq!(parse_score(""), None);
    }

    #[test]
    fn test_parse_overlong_run_is_none() {
        // A digit run that overflows u32 is not a score.
        assert_eq!(parse_score("99999999999999999999"), None);
    }

    #[tokio::test]
    async fn test_keyword_only_scorer_matches_keyword_fn() {
        let scorer = KeywordOnlyScorer;
        let score = scorer
            .score("Python Java SQL", "We need Python and SQL skills")
            .await
            .unwrap();
        assert_eq!(score, score_keywords("Python Java SQL", "We need Python and SQL skills"));
    }
}
