use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    /// RapidAPI key for the JSearch provider. The provider is skipped entirely
    /// when unset.
    pub jsearch_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Working directory for generated artifacts (48-hour retention tier).
    pub vault_dir: PathBuf,
    /// Optional archive directory (60-day retention tier). Archival duplication
    /// is enabled by setting this variable.
    pub vault_archive_dir: Option<PathBuf>,
    pub vault_working_expiry: Duration,
    pub vault_archive_expiry: Duration,
    pub vault_sweep_interval: Duration,
    pub job_cache_ttl: Duration,
    /// When true, per-posting scoring and ranking run before boolean filters.
    pub score_before_filter: bool,
    /// When false, the semantic scorer is disabled and matching runs on
    /// keyword overlap alone.
    pub semantic_scoring: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            jsearch_api_key: std::env::var("JSEARCH_API_KEY").ok().filter(|k| !k.is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            vault_dir: PathBuf::from(
                std::env::var("VAULT_DIR").unwrap_or_else(|_| "/tmp/ascent_vault".to_string()),
            ),
            vault_archive_dir: std::env::var("VAULT_ARCHIVE_DIR").ok().map(PathBuf::from),
            vault_working_expiry: Duration::from_secs(
                env_u64("VAULT_WORKING_EXPIRY_HOURS", 48)? * 3600,
            ),
            vault_archive_expiry: Duration::from_secs(
                env_u64("VAULT_ARCHIVE_EXPIRY_DAYS", 60)? * 86_400,
            ),
            vault_sweep_interval: Duration::from_secs(env_u64("VAULT_SWEEP_INTERVAL_SECS", 3600)?),
            job_cache_ttl: Duration::from_secs(env_u64("JOB_CACHE_TTL_SECS", 600)?),
            score_before_filter: env_bool("SCORE_BEFORE_FILTER", false),
            semantic_scoring: env_bool("ENABLE_SEMANTIC_SCORING", true),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(v) => v
            .parse::<u64>()
            .with_context(|| format!("{key} must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}
