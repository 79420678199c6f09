//! Job Aggregator — fetches postings from upstream providers, normalizes
//! them into one record shape, caches by keyword, and optionally ranks by
//! résumé match.

pub mod cache;
pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod providers;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::jobs::cache::JobCache;
use crate::jobs::providers::JobProvider;
use crate::matching::keyword::score_keywords;

/// Character budget for the `description` preview field.
const PREVIEW_LEN: usize = 280;

/// Normalized job posting. Ephemeral — rebuilt from upstream responses and
/// cached in memory only; nothing survives a process restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    /// Source-prefixed id, e.g. "jsearch_abc42".
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: Option<String>,
    /// Truncated preview of `jd_text` for listing views.
    pub description: String,
    pub jd_text: String,
    pub link: String,
    pub posted_at: Option<String>,
    pub employment_type: String,
    pub logo_url: Option<String>,
    pub h1b_sponsor: bool,
    pub source: String,
    /// Résumé match score, attached only when the search carried a résumé.
    pub numeric_score: Option<u8>,
}

/// Truncates a JD to the preview budget on a char boundary.
pub fn truncate_preview(jd_text: &str) -> String {
    if jd_text.chars().count() <= PREVIEW_LEN {
        return jd_text.to_string();
    }
    let mut preview: String = jd_text.chars().take(PREVIEW_LEN).collect();
    preview.push('…');
    preview
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilters {
    #[serde(default)]
    pub h1b_only: bool,
    #[serde(default)]
    pub remote_only: bool,
    #[serde(default)]
    pub fulltime_only: bool,
}

/// One job search request, post-validation.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub keyword: String,
    pub city: Option<String>,
    pub filters: JobFilters,
    /// Résumé text; when present each posting gets a `numeric_score` and the
    /// result is ranked by it.
    pub resume: Option<String>,
    /// Sort by posting recency when no résumé ranking applies.
    pub sort_by_recency: bool,
    pub top_n: usize,
}

pub struct JobAggregator {
    providers: Vec<Box<dyn JobProvider>>,
    fallback_provider: Option<Box<dyn JobProvider>>,
    cache: JobCache,
    /// When true, scoring and ranking run before boolean filters.
    score_before_filter: bool,
}

impl JobAggregator {
    pub fn new(
        providers: Vec<Box<dyn JobProvider>>,
        fallback_provider: Option<Box<dyn JobProvider>>,
        cache: JobCache,
        score_before_filter: bool,
    ) -> Self {
        Self {
            providers,
            fallback_provider,
            cache,
            score_before_filter,
        }
    }

    /// Runs a full search: cache-or-fetch, filter, optional scoring/sorting,
    /// truncation to `top_n`.
    pub async fn search(&self, query: &JobQuery) -> Result<Vec<JobPosting>, AppError> {
        let mut listings = self.fetch_or_cached(&query.keyword, query.city.as_deref()).await?;

        if self.score_before_filter {
            score_and_sort(&mut listings, query);
            listings = apply_filters(listings, &query.filters);
        } else {
            listings = apply_filters(listings, &query.filters);
            score_and_sort(&mut listings, query);
        }

        listings.truncate(query.top_n);
        Ok(listings)
    }

    /// Finds one posting by id within the listing set for `keyword`.
    pub async fn find(&self, job_id: &str, keyword: &str) -> Result<JobPosting, AppError> {
        let listings = self.fetch_or_cached(keyword, None).await?;
        listings
            .into_iter()
            .find(|job| job.id == job_id)
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
    }

    /// Returns cached listings when fresh, otherwise queries providers in
    /// preference order and overwrites the cache entry. A single provider
    /// failure is logged and skipped; the LLM fallback runs only when every
    /// provider came back empty; an empty final result is `NoJobsAvailable`.
    async fn fetch_or_cached(
        &self,
        keyword: &str,
        city: Option<&str>,
    ) -> Result<Vec<JobPosting>, AppError> {
        let key = JobCache::key(keyword);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let mut listings = Vec::new();
        for provider in &self.providers {
            match provider.fetch(keyword, city).await {
                Ok(jobs) => listings.extend(jobs),
                Err(e) => warn!(source = provider.source_id(), "job provider failed: {e}"),
            }
        }

        if listings.is_empty() {
            if let Some(fallback) = &self.fallback_provider {
                match fallback.fetch(keyword, city).await {
                    Ok(jobs) => listings.extend(jobs),
                    Err(e) => warn!("job fallback failed: {e}"),
                }
            }
        }

        if listings.is_empty() {
            return Err(AppError::NoJobsAvailable);
        }

        self.cache.put(&key, listings.clone());
        Ok(listings)
    }
}

/// Applies boolean filters by case-insensitive field match. Runs strictly
/// after normalization, never on raw provider records.
fn apply_filters(listings: Vec<JobPosting>, filters: &JobFilters) -> Vec<JobPosting> {
    listings
        .into_iter()
        .filter(|job| {
            (!filters.h1b_only || job.h1b_sponsor)
                && (!filters.remote_only || job.location.to_lowercase().contains("remote"))
                && (!filters.fulltime_only
                    || job.employment_type.to_lowercase().replace(['_', '-', ' '], "")
                        .contains("fulltime"))
        })
        .collect()
}

/// Attaches per-posting résumé scores and sorts: by score when a résumé is
/// present, by recency when requested, otherwise provider order is kept.
/// Per-posting scoring uses the keyword scorer, never an LLM call.
fn score_and_sort(listings: &mut [JobPosting], query: &JobQuery) {
    if let Some(resume) = query.resume.as_deref().filter(|r| !r.trim().is_empty()) {
        for job in listings.iter_mut() {
            job.numeric_score = Some(score_keywords(resume, &job.jd_text));
        }
        listings.sort_by(|a, b| b.numeric_score.cmp(&a.numeric_score));
    } else if query.sort_by_recency {
        listings.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn posting(id: &str, location: &str, employment_type: &str, jd_text: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: location.to_string(),
            salary: None,
            description: truncate_preview(jd_text),
            jd_text: jd_text.to_string(),
            link: "https://example.com".to_string(),
            posted_at: None,
            employment_type: employment_type.to_string(),
            logo_url: None,
            h1b_sponsor: jd_text.to_lowercase().contains("h1b"),
            source: "stub".to_string(),
            numeric_score: None,
        }
    }

    /// Provider stub that counts upstream calls.
    struct StubProvider {
        jobs: Vec<JobPosting>,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl JobProvider for StubProvider {
        fn source_id(&self) -> &'static str {
            "stub"
        }

        async fn fetch(
            &self,
            _keyword: &str,
            _city: Option<&str>,
        ) -> Result<Vec<JobPosting>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Provider("stub down".to_string()));
            }
            Ok(self.jobs.clone())
        }
    }

    fn aggregator_with(
        providers: Vec<Box<dyn JobProvider>>,
        fallback: Option<Box<dyn JobProvider>>,
    ) -> JobAggregator {
        JobAggregator::new(
            providers,
            fallback,
            JobCache::new(Duration::from_secs(600)),
            false,
        )
    }

    fn query(keyword: &str) -> JobQuery {
        JobQuery {
            keyword: keyword.to_string(),
            city: None,
            filters: JobFilters::default(),
            resume: None,
            sort_by_recency: false,
            top_n: 10,
        }
    }

    #[tokio::test]
    async fn test_second_search_within_ttl_skips_upstream() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider {
            jobs: vec![posting("stub_1", "Remote", "Full Time", "Rust")],
            calls: calls.clone(),
            fail: false,
        };
        let aggregator = aggregator_with(vec![Box::new(provider)], None);

        let first = aggregator.search(&query("rust")).await.unwrap();
        let second = aggregator.search(&query("rust")).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first[0].id, second[0].id);
    }

    #[tokio::test]
    async fn test_all_empty_raises_no_jobs_available() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider {
            jobs: vec![],
            calls: calls.clone(),
            fail: false,
        };
        let aggregator = aggregator_with(vec![Box::new(provider)], None);

        let err = aggregator.search(&query("nonexistent role xyz123")).await.unwrap_err();
        assert!(matches!(err, AppError::NoJobsAvailable));
    }

    #[tokio::test]
    async fn test_provider_failure_falls_through_to_fallback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let broken = StubProvider {
            jobs: vec![],
            calls: calls.clone(),
            fail: true,
        };
        let fallback = StubProvider {
            jobs: vec![posting("fallback_0", "Remote", "Full Time", "generated")],
            calls: calls.clone(),
            fail: false,
        };
        let aggregator = aggregator_with(vec![Box::new(broken)], Some(Box::new(fallback)));

        let listings = aggregator.search(&query("rust")).await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "fallback_0");
    }

    #[tokio::test]
    async fn test_failing_fallback_surfaces_no_jobs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let broken = StubProvider {
            jobs: vec![],
            calls: calls.clone(),
            fail: true,
        };
        let broken_fallback = StubProvider {
            jobs: vec![],
            calls: calls.clone(),
            fail: true,
        };
        let aggregator =
            aggregator_with(vec![Box::new(broken)], Some(Box::new(broken_fallback)));

        let err = aggregator.search(&query("rust")).await.unwrap_err();
        assert!(matches!(err, AppError::NoJobsAvailable));
    }

    #[tokio::test]
    async fn test_find_by_id_and_not_found() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider {
            jobs: vec![posting("stub_7", "Remote", "Full Time", "Rust")],
            calls,
            fail: false,
        };
        let aggregator = aggregator_with(vec![Box::new(provider)], None);

        assert_eq!(aggregator.find("stub_7", "rust").await.unwrap().id, "stub_7");
        assert!(matches!(
            aggregator.find("stub_99", "rust").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_filters_are_case_insensitive() {
        let listings = vec![
            posting("a", "Remote, Worldwide", "Full Time", "plain"),
            posting("b", "Austin, TX", "FULLTIME", "We sponsor H1B"),
            posting("c", "Berlin", "Part Time", "plain"),
        ];

        let remote = apply_filters(
            listings.clone(),
            &JobFilters {
                remote_only: true,
                ..Default::default()
            },
        );
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0].id, "a");

        let h1b = apply_filters(
            listings.clone(),
            &JobFilters {
                h1b_only: true,
                ..Default::default()
            },
        );
        assert_eq!(h1b.len(), 1);
        assert_eq!(h1b[0].id, "b");

        let fulltime = apply_filters(
            listings,
            &JobFilters {
                fulltime_only: true,
                ..Default::default()
            },
        );
        assert_eq!(fulltime.len(), 2);
    }

    #[test]
    fn test_resume_ranking_sorts_descending() {
        let mut listings = vec![
            posting("low", "Remote", "Full Time", "kubernetes terraform golang"),
            posting("high", "Remote", "Full Time", "python sql pipelines"),
        ];
        let mut q = query("data");
        q.resume = Some("python sql pipelines warehouse".to_string());

        score_and_sort(&mut listings, &q);

        assert_eq!(listings[0].id, "high");
        assert!(listings[0].numeric_score.unwrap() > listings[1].numeric_score.unwrap());
    }

    #[test]
    fn test_recency_sort_without_resume() {
        let mut older = posting("older", "Remote", "Full Time", "x");
        older.posted_at = Some("2026-07-01T00:00:00Z".to_string());
        let mut newer = posting("newer", "Remote", "Full Time", "x");
        newer.posted_at = Some("2026-08-01T00:00:00Z".to_string());

        let mut listings = vec![older, newer];
        let mut q = query("data");
        q.sort_by_recency = true;

        score_and_sort(&mut listings, &q);
        assert_eq!(listings[0].id, "newer");
    }

    #[tokio::test]
    async fn test_top_n_truncates_after_sorting() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = StubProvider {
            jobs: (0..20)
                .map(|i| posting(&format!("stub_{i}"), "Remote", "Full Time", "rust"))
                .collect(),
            calls,
            fail: false,
        };
        let aggregator = aggregator_with(vec![Box::new(provider)], None);

        let mut q = query("rust");
        q.top_n = 5;
        let listings = aggregator.search(&q).await.unwrap();
        assert_eq!(listings.len(), 5);
    }

    #[test]
    fn test_truncate_preview_short_text_untouched() {
        assert_eq!(truncate_preview("short JD"), "short JD");
    }
}
