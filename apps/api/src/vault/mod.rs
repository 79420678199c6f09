//! Temp Vault — ephemeral, time-expiring storage for generated artifacts.
//!
//! Files are write-once, read-many, delete-by-sweep. There is no locking:
//! the filename embeds a second-granularity timestamp, so concurrent stores
//! never target the same name, and sweep races with stores are accepted (the
//! expiry threshold is hours, not seconds).
//!
//! Two retention tiers: the working directory (default 48 h) and an optional
//! archive directory holding a duplicate of every stored file (default 60 d).

pub mod handlers;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;

pub struct TempVault {
    working_dir: PathBuf,
    archive_dir: Option<PathBuf>,
    working_expiry: Duration,
    archive_expiry: Duration,
}

/// One working-directory entry, as returned by `list()`.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactEntry {
    pub name: String,
    pub modified: DateTime<Utc>,
}

/// Counts of files removed by one `sweep()` pass.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub working_deleted: usize,
    pub archive_deleted: usize,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.working_deleted + self.archive_deleted
    }
}

impl TempVault {
    /// Creates the vault, making both directories if they do not exist.
    pub fn new(
        working_dir: PathBuf,
        archive_dir: Option<PathBuf>,
        working_expiry: Duration,
        archive_expiry: Duration,
    ) -> Result<Self, AppError> {
        fs::create_dir_all(&working_dir)
            .map_err(|e| AppError::Storage(format!("cannot create vault dir: {e}")))?;
        if let Some(dir) = &archive_dir {
            fs::create_dir_all(dir)
                .map_err(|e| AppError::Storage(format!("cannot create archive dir: {e}")))?;
        }
        Ok(Self {
            working_dir,
            archive_dir,
            working_expiry,
            archive_expiry,
        })
    }

    /// Writes an artifact and returns its caller-facing filename handle.
    ///
    /// The name encodes `{file_type}_{role}_{company}_{timestamp}.pdf`. When
    /// an archive directory is configured an identical copy lands there too;
    /// either write failing fails the store.
    pub fn store(
        &self,
        bytes: &[u8],
        role: &str,
        company: &str,
        file_type: &str,
    ) -> Result<String, AppError> {
        let filename = artifact_filename(role, company, file_type, Utc::now());

        fs::write(self.working_dir.join(&filename), bytes)
            .map_err(|e| AppError::Storage(format!("failed to write {filename}: {e}")))?;

        if let Some(archive) = &self.archive_dir {
            fs::write(archive.join(&filename), bytes)
                .map_err(|e| AppError::Storage(format!("failed to archive {filename}: {e}")))?;
        }

        Ok(filename)
    }

    /// Reads an artifact from the working directory.
    /// A missing file is an explicit `NotFound`, applied uniformly — callers
    /// never have to guess about empty-bytes sentinels.
    pub fn load(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        let safe = validate_handle(filename)?;
        let path = self.working_dir.join(safe);
        if !path.is_file() {
            return Err(AppError::NotFound(format!("artifact {filename} not found")));
        }
        fs::read(&path).map_err(|e| AppError::Storage(format!("failed to read {filename}: {e}")))
    }

    /// Deletes every file past its tier's expiry window. Per-file errors are
    /// logged and skipped — sweep must never die halfway through a directory.
    pub fn sweep(&self) -> SweepReport {
        let report = SweepReport {
            working_deleted: sweep_dir(&self.working_dir, self.working_expiry),
            archive_deleted: self
                .archive_dir
                .as_deref()
                .map(|dir| sweep_dir(dir, self.archive_expiry))
                .unwrap_or(0),
        };
        if report.total() > 0 {
            info!(
                working = report.working_deleted,
                archive = report.archive_deleted,
                "vault sweep removed expired artifacts"
            );
        }
        report
    }

    /// Lists working-directory artifacts, most recently modified first.
    pub fn list(&self) -> Result<Vec<ArtifactEntry>, AppError> {
        let entries = fs::read_dir(&self.working_dir)
            .map_err(|e| AppError::Storage(format!("cannot list vault: {e}")))?;

        let mut artifacts = Vec::new();
        for entry in entries.flatten() {
            let metadata = match entry.metadata() {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            artifacts.push(ArtifactEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                modified: modified.into(),
            });
        }

        artifacts.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(artifacts)
    }
}

/// Deletes files in `dir` whose age strictly exceeds `expiry`. Returns the
/// delete count.
fn sweep_dir(dir: &Path, expiry: Duration) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("sweep cannot read {}: {e}", dir.display());
            return 0;
        }
    };

    let now = std::time::SystemTime::now();
    let mut deleted = 0;

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age > expiry {
            match fs::remove_file(&path) {
                Ok(()) => deleted += 1,
                Err(e) => warn!("sweep failed to delete {}: {e}", path.display()),
            }
        }
    }

    deleted
}

/// Builds the artifact filename: `{file_type}_{role}_{company}_{timestamp}.pdf`.
fn artifact_filename(role: &str, company: &str, file_type: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}_{}.pdf",
        sanitize(file_type),
        sanitize(role),
        sanitize(company),
        now.format("%Y%m%d%H%M%S")
    )
}

/// Makes a name segment filesystem-safe: spaces become underscores, path
/// separators and dots are dropped.
fn sanitize(part: &str) -> String {
    let cleaned: String = part
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '.'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

/// Rejects handles that could escape the vault directory.
fn validate_handle(filename: &str) -> Result<&str, AppError> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(AppError::Validation("invalid artifact filename".to_string()));
    }
    Ok(filename)
}
