//! Match Aggregator — blends the deterministic keyword score with the
//! LLM semantic score into a single user-facing match percentage.

pub mod handlers;
pub mod keyword;
pub mod prompts;
pub mod semantic;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::keyword::score_keywords;
use crate::matching::semantic::SemanticScorer;

/// Transient result of matching one résumé against one JD.
/// Computed fresh per request pair, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub keyword_score: u8,
    pub semantic_score: u8,
    /// Rounded arithmetic mean of the two sub-scores.
    pub blended_score: u8,
    pub explanation: String,
}

/// Explanation band for a (keyword, semantic) score pair.
///
/// Bands are evaluated in priority order — the stricter band first — so
/// boundary cases resolve deterministically: (80, 59) is Partial, not Good,
/// because Good requires BOTH scores ≥ 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBand {
    Excellent,
    Good,
    Partial,
    Weak,
}

impl MatchBand {
    pub fn classify(keyword_score: u8, semantic_score: u8) -> Self {
        if keyword_score >= 80 && semantic_score >= 80 {
            MatchBand::Excellent
        } else if keyword_score >= 60 && semantic_score >= 60 {
            MatchBand::Good
        } else if keyword_score >= 40 || semantic_score >= 40 {
            MatchBand::Partial
        } else {
            MatchBand::Weak
        }
    }

    pub fn sentence(&self) -> &'static str {
        match self {
            MatchBand::Excellent => "Excellent match! Both ATS and semantic fit are strong.",
            MatchBand::Good => "Good match. Resume covers most key requirements.",
            MatchBand::Partial => {
                "Partial match. Consider adding more relevant skills or experience."
            }
            MatchBand::Weak => "Weak match. Resume may not meet core requirements for this job.",
        }
    }
}

/// Rounded arithmetic mean of two scores already clamped to [0, 100].
pub fn blend(keyword_score: u8, semantic_score: u8) -> u8 {
    ((keyword_score as f64 + semantic_score as f64) / 2.0).round() as u8
}

/// Rejects empty-after-trim text fields with a 422-style validation error.
pub fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

/// Computes a full `MatchResult` for a résumé/JD pair.
///
/// Both inputs must be non-empty after trimming. The keyword and semantic
/// scores are computed independently; the semantic side may itself have
/// silently degraded to keyword scoring (see `semantic`).
pub async fn compute_match(
    resume: &str,
    jd: &str,
    scorer: &dyn SemanticScorer,
) -> Result<MatchResult, AppError> {
    let resume = require_text(resume, "resume")?;
    let jd = require_text(jd, "jd")?;

    let keyword_score = score_keywords(resume, jd);
    let semantic_score = scorer.score(resume, jd).await?;

    Ok(MatchResult {
        keyword_score,
        semantic_score,
        blended_score: blend(keyword_score, semantic_score),
        explanation: MatchBand::classify(keyword_score, semantic_score)
            .sentence()
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::semantic::KeywordOnlyScorer;
    use async_trait::async_trait;

    /// Scorer stub returning a fixed semantic score.
    struct FixedScorer(u8);

    #[async_trait]
    impl SemanticScorer for FixedScorer {
        async fn score(&self, _resume: &str, _jd: &str) -> Result<u8, AppError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_band_both_high_is_excellent() {
        assert_eq!(MatchBand::classify(80, 80), MatchBand::Excellent);
        assert_eq!(MatchBand::classify(95, 82), MatchBand::Excellent);
    }

    #[test]
    fn test_band_both_moderate_is_good() {
        assert_eq!(MatchBand::classify(60, 60), MatchBand::Good);
        assert_eq!(MatchBand::classify(79, 81), MatchBand::Good);
    }

    #[test]
    fn test_band_one_high_one_low_is_partial() {
        // The "both ≥ 60" rule requires both; (80, 59) falls through to Partial.
        assert_eq!(MatchBand::classify(80, 59), MatchBand::Partial);
        assert_eq!(MatchBand::classify(40, 0), MatchBand::Partial);
        assert_eq!(MatchBand::classify(0, 40), MatchBand::Partial);
    }

    #[test]
    fn test_band_both_low_is_weak() {
        assert_eq!(MatchBand::classify(39, 39), MatchBand::Weak);
        assert_eq!(MatchBand::classify(0, 0), MatchBand::Weak);
    }

    #[test]
    fn test_blend_is_rounded_mean() {
        assert_eq!(blend(80, 80), 80);
        assert_eq!(blend(80, 81), 81); // 80.5 rounds up
        assert_eq!(blend(0, 100), 50);
        assert_eq!(blend(33, 34), 34); // 33.5 rounds up
        assert_eq!(blend(0, 0), 0);
        assert_eq!(blend(100, 100), 100);
    }

    #[tokio::test]
    async fn test_compute_match_rejects_empty_resume() {
        let err = compute_match("", "anything", &KeywordOnlyScorer)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_compute_match_rejects_whitespace_jd() {
        let err = compute_match("resume", "   \n\t ", &KeywordOnlyScorer)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_compute_match_blends_and_explains() {
        // keyword_score = 100 (2/2), semantic fixed at 80 → blended 90, Excellent.
        let result = compute_match(
            "Python Java SQL",
            "We need Python and SQL skills",
            &FixedScorer(80),
        )
        .await
        .unwrap();
        assert_eq!(result.keyword_score, 100);
        assert_eq!(result.semantic_score, 80);
        assert_eq!(result.blended_score, 90);
        assert_eq!(result.explanation, MatchBand::Excellent.sentence());
    }

    #[tokio::test]
    async fn test_compute_match_boundary_explanation_is_partial() {
        let result = compute_match(
            "Python Java SQL",
            "We need Python and SQL skills",
            &FixedScorer(59),
        )
        .await
        .unwrap();
        // (100, 59): Good needs both ≥ 60 — first matching band is Partial.
        assert_eq!(result.explanation, MatchBand::Partial.sentence());
    }
}
