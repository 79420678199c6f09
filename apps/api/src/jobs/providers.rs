//! Upstream job-search providers and their normalization into `JobPosting`.
//!
//! Each provider has its own native JSON shape; normalization maps every
//! shape onto the one record the rest of the system understands. A provider
//! failure is logged by the aggregator and treated as an empty result for
//! that provider only.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::{truncate_preview, JobPosting};

const REMOTIVE_API_URL: &str = "https://remotive.io/api/remote-jobs";
const JSEARCH_API_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_API_HOST: &str = "jsearch.p.rapidapi.com";

/// One upstream source of job postings.
#[async_trait]
pub trait JobProvider: Send + Sync {
    fn source_id(&self) -> &'static str;

    async fn fetch(&self, keyword: &str, city: Option<&str>)
        -> Result<Vec<JobPosting>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Remotive — primary provider, no API key required
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    id: i64,
    url: String,
    title: String,
    company_name: String,
    #[serde(default)]
    company_logo: Option<String>,
    #[serde(default)]
    job_type: Option<String>,
    #[serde(default)]
    publication_date: Option<String>,
    #[serde(default)]
    candidate_required_location: Option<String>,
    #[serde(default)]
    salary: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

pub struct RemotiveProvider {
    http: Client,
}

impl RemotiveProvider {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl JobProvider for RemotiveProvider {
    fn source_id(&self) -> &'static str {
        "remotive"
    }

    async fn fetch(
        &self,
        keyword: &str,
        _city: Option<&str>,
    ) -> Result<Vec<JobPosting>, AppError> {
        let response = self
            .http
            .get(REMOTIVE_API_URL)
            .query(&[("search", keyword)])
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("remotive request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::Provider(format!("remotive returned error: {e}")))?
            .json::<RemotiveResponse>()
            .await
            .map_err(|e| AppError::Provider(format!("remotive response malformed: {e}")))?;

        Ok(response.jobs.into_iter().map(normalize_remotive).collect())
    }
}

fn normalize_remotive(job: RemotiveJob) -> JobPosting {
    let location = job
        .candidate_required_location
        .unwrap_or_else(|| "Remote".to_string());
    let jd_text = job.description.unwrap_or_default();
    // Remotive exposes no sponsorship data; remote-friendly is the best proxy.
    let h1b_sponsor = location.to_lowercase().contains("remote");

    JobPosting {
        id: format!("remotive_{}", job.id),
        title: job.title,
        company: job.company_name,
        location,
        salary: job.salary.filter(|s| !s.is_empty()),
        description: truncate_preview(&jd_text),
        jd_text,
        link: job.url,
        posted_at: job.publication_date,
        employment_type: job.job_type.unwrap_or_else(|| "Full Time".to_string()),
        logo_url: job.company_logo.filter(|l| !l.is_empty()),
        h1b_sponsor,
        source: "remotive".to_string(),
        numeric_score: None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JSearch (RapidAPI) — secondary provider, keyed
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct JSearchResponse {
    #[serde(default)]
    data: Vec<JSearchJob>,
}

#[derive(Debug, Deserialize)]
struct JSearchJob {
    job_id: String,
    job_title: String,
    employer_name: String,
    #[serde(default)]
    employer_logo: Option<String>,
    #[serde(default)]
    job_city: Option<String>,
    #[serde(default)]
    job_state: Option<String>,
    #[serde(default)]
    job_country: Option<String>,
    #[serde(default)]
    job_employment_type: Option<String>,
    job_apply_link: String,
    #[serde(default)]
    job_description: String,
    #[serde(default)]
    job_posted_at_datetime_utc: Option<String>,
    #[serde(default)]
    job_min_salary: Option<f64>,
    #[serde(default)]
    job_max_salary: Option<f64>,
}

pub struct JSearchProvider {
    http: Client,
    api_key: String,
}

impl JSearchProvider {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[async_trait]
impl JobProvider for JSearchProvider {
    fn source_id(&self) -> &'static str {
        "jsearch"
    }

    async fn fetch(&self, keyword: &str, city: Option<&str>) -> Result<Vec<JobPosting>, AppError> {
        let query = match city {
            Some(city) => format!("{keyword} in {city}"),
            None => keyword.to_string(),
        };

        let response = self
            .http
            .get(JSEARCH_API_URL)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", JSEARCH_API_HOST)
            .query(&[("query", query.as_str()), ("num_pages", "1")])
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("jsearch request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::Provider(format!("jsearch returned error: {e}")))?
            .json::<JSearchResponse>()
            .await
            .map_err(|e| AppError::Provider(format!("jsearch response malformed: {e}")))?;

        Ok(response.data.into_iter().map(normalize_jsearch).collect())
    }
}

fn normalize_jsearch(job: JSearchJob) -> JobPosting {
    let location = [job.job_city, job.job_state, job.job_country]
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let h1b_sponsor = job.job_description.to_lowercase().contains("h1b");
    let salary = match (job.job_min_salary, job.job_max_salary) {
        (Some(min), Some(max)) => Some(format!("{min:.0}–{max:.0}")),
        (Some(min), None) => Some(format!("{min:.0}+")),
        (None, Some(max)) => Some(format!("up to {max:.0}")),
        (None, None) => None,
    };

    JobPosting {
        id: format!("jsearch_{}", job.job_id),
        title: job.job_title,
        company: job.employer_name,
        location: if location.is_empty() {
            "Unknown".to_string()
        } else {
            location
        },
        salary,
        description: truncate_preview(&job.job_description),
        jd_text: job.job_description,
        link: job.job_apply_link,
        posted_at: job.job_posted_at_datetime_utc,
        employment_type: job
            .job_employment_type
            .unwrap_or_else(|| "Full Time".to_string()),
        logo_url: job.employer_logo.filter(|l| !l.is_empty()),
        h1b_sponsor,
        source: "jsearch".to_string(),
        numeric_score: None,
    }
}
