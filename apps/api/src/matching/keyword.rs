//! Keyword (ATS) scorer — deterministic overlap between a résumé and a JD.
//!
//! Pure-Rust, no I/O, no failure modes beyond degenerate input. This is also
//! the silent fallback for the semantic scorer and the cheap per-posting
//! ranker in the job aggregator.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Generic hiring filler that never counts as a JD keyword. Without this a
/// résumé is penalized for not echoing phrases like "we need" or "skills".
const STOPWORDS: &[&str] = &[
    "the", "and", "is", "in", "to", "of", "a", "for", "on", "with", "we", "our", "you", "your",
    "need", "will", "have", "has", "are", "skills", "must", "plus",
];

fn word_regex() -> &'static Regex {
    static WORD_RE: OnceLock<Regex> = OnceLock::new();
    WORD_RE.get_or_init(|| Regex::new(r"\w+").expect("word regex is valid"))
}

fn tokenize(text: &str) -> HashSet<String> {
    word_regex()
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Percentage of the JD's significant keywords found verbatim in the résumé.
///
/// Tokenizes both texts into lowercase word sets, drops stopwords and tokens
/// of length ≤ 2 from the JD side, then returns
/// `round(100 * |JD ∩ resume| / |JD|)` clamped to 100. An empty JD keyword
/// set scores 0.
pub fn score_keywords(resume: &str, jd: &str) -> u8 {
    let resume_words = tokenize(resume);
    let jd_keywords: HashSet<String> = tokenize(jd)
        .into_iter()
        .filter(|w| w.len() > 2 && !STOPWORDS.contains(&w.as_str()))
        .collect();

    if jd_keywords.is_empty() {
        return 0;
    }

    let matched = jd_keywords
        .iter()
        .filter(|w| resume_words.contains(*w))
        .count();

    let score = (matched as f64 / jd_keywords.len() as f64 * 100.0).round() as u32;
    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_overlap_scores_100() {
        // "We", "need", "and", "skills" are all filtered; 2/2 JD keywords hit.
        let score = score_keywords("Python Java SQL", "We need Python and SQL skills");
        assert_eq!(score, 100);
    }

    #[test]
    fn test_partial_overlap() {
        let score = score_keywords("Python developer", "Python Rust Kubernetes");
        assert_eq!(score, 33); // 1 of 3, rounded
    }

    #[test]
    fn test_invariant_to_case_and_order() {
        let a = score_keywords("rust tokio axum", "Axum Tokio Rust");
        let b = score_keywords("AXUM RUST TOKIO", "rust axum tokio");
        assert_eq!(a, b);
        assert_eq!(a, 100);
    }

    #[test]
    fn test_stopword_only_jd_scores_zero() {
        assert_eq!(score_keywords("anything at all", "the and is to of"), 0);
    }

    #[test]
    fn test_empty_jd_scores_zero() {
        assert_eq!(score_keywords("resume text", ""), 0);
    }

    #[test]
    fn test_short_tokens_discarded() {
        // "go" (len 2) and "c" are dropped from the JD keyword set.
        assert_eq!(score_keywords("nothing relevant", "go c"), 0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        assert_eq!(score_keywords("painter sculptor", "kubernetes terraform"), 0);
    }

    #[test]
    fn test_score_never_exceeds_100() {
        // Resume repeats keywords; set semantics keep the ratio at 1.0.
        let score = score_keywords("rust rust rust tokio tokio", "Rust Tokio");
        assert_eq!(score, 100);
    }
}
