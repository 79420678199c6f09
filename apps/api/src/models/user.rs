#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One row per user. The relational store is a collaborator, not a core
/// subsystem: handlers read and write a few columns best-effort, and no
/// scoring or vault invariant depends on it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Extracted résumé text from the most recent upload.
    pub resume_text: Option<String>,
    /// Onboarding preferences blob (preferred roles, cities, visa needs).
    pub onboarding: Option<Value>,
    /// Last tailored résumé — overwritten per tailoring run, not versioned.
    pub tailored_resume: Option<String>,
    pub created_at: DateTime<Utc>,
}
