//! In-memory TTL cache for normalized job listings.
//!
//! Keyed by normalized search keyword. Read-check-then-write semantics:
//! concurrent refreshes for the same keyword may both hit upstream — the
//! last writer wins, which is duplicate work but never a correctness issue.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::jobs::JobPosting;

struct CacheEntry {
    stored_at: Instant,
    listings: Vec<JobPosting>,
}

pub struct JobCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl JobCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Normalized cache key for a search keyword.
    pub fn key(keyword: &str) -> String {
        keyword.trim().to_lowercase()
    }

    /// Returns a clone of the cached listings when the entry is younger than
    /// the TTL. Stale entries are removed on read.
    pub fn get(&self, key: &str) -> Option<Vec<JobPosting>> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.listings.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Overwrites the entry for `key` with fresh listings and the current
    /// timestamp.
    pub fn put(&self, key: &str, listings: Vec<JobPosting>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                listings,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::JobPosting;

    fn posting(id: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: "Data Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: None,
            description: "preview".to_string(),
            jd_text: "full text".to_string(),
            link: "https://example.com/job".to_string(),
            posted_at: None,
            employment_type: "Full Time".to_string(),
            logo_url: None,
            h1b_sponsor: false,
            source: "test".to_string(),
            numeric_score: None,
        }
    }

    #[test]
    fn test_hit_within_ttl_returns_identical_listings() {
        let cache = JobCache::new(Duration::from_secs(600));
        cache.put("rust", vec![posting("test_1"), posting("test_2")]);

        let first = cache.get("rust").unwrap();
        let second = cache.get("rust").unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn test_expired_entry_misses_and_is_evicted() {
        let cache = JobCache::new(Duration::ZERO);
        cache.put("rust", vec![posting("test_1")]);

        assert!(cache.get("rust").is_none());
        // Second read still misses — the stale entry was dropped.
        assert!(cache.get("rust").is_none());
    }

    #[test]
    fn test_miss_on_unknown_keyword() {
        let cache = JobCache::new(Duration::from_secs(600));
        assert!(cache.get("never stored").is_none());
    }

    #[test]
    fn test_put_overwrites_previous_entry() {
        let cache = JobCache::new(Duration::from_secs(600));
        cache.put("rust", vec![posting("test_1")]);
        cache.put("rust", vec![posting("test_9")]);

        let listings = cache.get("rust").unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "test_9");
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(JobCache::key("  Data Scientist "), "data scientist");
    }
}
