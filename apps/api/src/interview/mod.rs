//! Interview question generation with a static preset bank as fallback.
//!
//! The original product also voiced the answers over TTS and rendered an
//! avatar video; those are external collaborators and are not part of this
//! service — callers get the questions and bring their own delivery.

pub mod handlers;
pub mod prompts;

use tracing::warn;

use crate::interview::prompts::QUESTION_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

/// Where a question set came from, reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    Llm,
    Preset,
}

impl QuestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionSource::Llm => "llm",
            QuestionSource::Preset => "preset",
        }
    }
}

/// Static question bank, keyed by round name. Unknown rounds get the HR set.
pub fn preset_round(round: &str) -> &'static [&'static str] {
    match round {
        "Technical" => &[
            "Explain the core principles of object-oriented design.",
            "How does a REST API work end to end?",
            "What is a deadlock and how do databases avoid them?",
            "What is the difference between TCP and UDP?",
            "How does garbage collection work in a managed runtime?",
        ],
        "System Design" => &[
            "Design a URL shortener like bit.ly.",
            "How would you design a scalable messaging system?",
            "Design an e-commerce checkout system.",
            "What are the trade-offs between SQL and NoSQL stores?",
            "Design a file storage system like Dropbox.",
        ],
        _ => &[
            "Tell me about yourself.",
            "Why do you want to work here?",
            "Where do you see yourself in 5 years?",
            "Describe a challenge you overcame.",
            "What are your strengths and weaknesses?",
        ],
    }
}

/// Generates tailored questions via the LLM, silently falling back to the
/// preset bank on any provider or parse failure — interview prep should
/// never 502 over a flaky upstream.
pub async fn generate_questions(
    llm: &LlmClient,
    resume: &str,
    jd: &str,
    round: &str,
) -> (Vec<String>, QuestionSource) {
    let prompt = QUESTION_PROMPT_TEMPLATE
        .replace("{round}", round)
        .replace("{resume}", resume)
        .replace("{jd_text}", jd);

    match llm.call_json::<Vec<String>>(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(questions) if !questions.is_empty() => (questions, QuestionSource::Llm),
        Ok(_) => {
            warn!("question generation returned an empty list, using preset round");
            (preset_fallback(round), QuestionSource::Preset)
        }
        Err(e) => {
            warn!("question generation failed ({e}), using preset round");
            (preset_fallback(round), QuestionSource::Preset)
        }
    }
}

fn preset_fallback(round: &str) -> Vec<String> {
    preset_round(round).iter().map(|q| q.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_rounds_are_nonempty() {
        for round in ["HR", "Technical", "System Design"] {
            assert_eq!(preset_round(round).len(), 5, "round {round}");
        }
    }

    #[test]
    fn test_unknown_round_defaults_to_hr() {
        assert_eq!(preset_round("Nonsense"), preset_round("HR"));
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(QuestionSource::Llm.as_str(), "llm");
        assert_eq!(QuestionSource::Preset.as_str(), "preset");
    }
}
