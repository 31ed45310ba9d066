//! Copy and delete job execution
//!
//! Jobs are independent: each one owns its paths, reports a single
//! [`JobOutcome`], and contains its own failures. Nothing here aborts a
//! sibling job.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{error, info};

use crate::comparison::FileComparator;
use crate::error::Result;

/// One independently schedulable unit of work
#[derive(Debug, Clone)]
pub enum SyncJob {
    /// Copy a source file over its mirrored destination path if different
    Copy {
        /// Absolute source file
        source: PathBuf,
        /// Mirrored absolute destination file
        dest: PathBuf,
        /// Root-relative path, used for logging
        relative: PathBuf,
    },
    /// Delete a destination file absent from the source
    Delete {
        /// Absolute destination file
        path: PathBuf,
        /// Root-relative path, used for logging
        relative: PathBuf,
    },
}

/// What one finished job amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The file was copied (new or changed)
    Copied,
    /// Source and destination were already identical
    UpToDate,
    /// The destination file was removed
    Deleted,
    /// The job failed; the message was already logged
    Failed(String),
}

/// Runs one job, containing any failure within it
pub struct JobExecutor;

impl JobExecutor {
    /// Execute `job`, never propagating its errors
    #[must_use]
    pub fn run(job: &SyncJob) -> JobOutcome {
        match Self::execute(job) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{e:#}");
                JobOutcome::Failed(format!("{e:#}"))
            }
        }
    }

    fn execute(job: &SyncJob) -> Result<JobOutcome> {
        match job {
            SyncJob::Copy {
                source,
                dest,
                relative,
            } => {
                if FileComparator::are_equal(source, dest)? {
                    return Ok(JobOutcome::UpToDate);
                }
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
                fs::copy(source, dest).with_context(|| {
                    format!(
                        "Failed to copy {} to {}",
                        source.display(),
                        dest.display()
                    )
                })?;
                info!("copy file: {}", relative.display());
                Ok(JobOutcome::Copied)
            }
            SyncJob::Delete { path, relative } => {
                fs::remove_file(path)
                    .with_context(|| format!("Failed to remove file: {}", path.display()))?;
                info!("remove file: {}", relative.display());
                Ok(JobOutcome::Deleted)
            }
        }
    }
}
