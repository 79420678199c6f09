//! LLM-generated job list — the last-resort provider when every upstream
//! search API fails or returns nothing.
//!
//! These listings are synthesized, not scraped; they are tagged with source
//! "fallback" so clients can present them accordingly.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::prompts::JOB_FALLBACK_TEMPLATE;
use crate::jobs::providers::JobProvider;
use crate::jobs::{truncate_preview, JobPosting};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

#[derive(Debug, Deserialize)]
pub struct FallbackJob {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub jd_text: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
}

pub struct LlmFallbackProvider {
    llm: LlmClient,
}

impl LlmFallbackProvider {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl JobProvider for LlmFallbackProvider {
    fn source_id(&self) -> &'static str {
        "fallback"
    }

    async fn fetch(
        &self,
        keyword: &str,
        _city: Option<&str>,
    ) -> Result<Vec<JobPosting>, AppError> {
        let prompt = JOB_FALLBACK_TEMPLATE.replace("{keyword}", keyword);

        let jobs: Vec<FallbackJob> = self
            .llm
            .call_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Provider(format!("job fallback failed: {e}")))?;

        Ok(jobs
            .into_iter()
            .enumerate()
            .map(|(i, job)| normalize_fallback(i, job))
            .collect())
    }
}

fn normalize_fallback(index: usize, job: FallbackJob) -> JobPosting {
    JobPosting {
        id: format!("fallback_{index}"),
        title: job.title,
        company: job.company,
        location: job.location.unwrap_or_else(|| "Remote".to_string()),
        salary: None,
        description: truncate_preview(&job.jd_text),
        jd_text: job.jd_text,
        link: job.url.unwrap_or_default(),
        posted_at: None,
        employment_type: job.employment_type.unwrap_or_else(|| "Full Time".to_string()),
        logo_url: None,
        h1b_sponsor: false,
        source: "fallback".to_string(),
        numeric_score: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_jobs_deserialize_and_normalize() {
        let json = r#"[
            {
                "title": "Data Engineer",
                "company": "Example Corp",
                "location": "Remote",
                "jd_text": "Build ELT pipelines in Python and SQL.",
                "url": "https://example.com/jobs/1",
                "employment_type": "Full Time"
            },
            {
                "title": "Analytics Engineer",
                "company": "Other Inc",
                "jd_text": "dbt and warehouse modeling."
            }
        ]"#;
        let jobs: Vec<FallbackJob> = serde_json::from_str(json).unwrap();
        let postings: Vec<JobPosting> = jobs
            .into_iter()
            .enumerate()
            .map(|(i, j)| normalize_fallback(i, j))
            .collect();

        assert_eq!(postings[0].id, "fallback_0");
        assert_eq!(postings[1].id, "fallback_1");
        assert_eq!(postings[1].location, "Remote");
        assert_eq!(postings[1].employment_type, "Full Time");
        assert!(postings.iter().all(|p| p.source == "fallback"));
    }
}
