//! One-way synchronization engine
//!
//! The engine walks both roots, diffs them by root-relative path, and runs
//! the resulting copy/delete jobs on a bounded worker pool. Precondition
//! failures abort the invocation; individual job failures are logged,
//! counted, and never stop sibling jobs.

mod executor;
mod orchestrator;
mod reporting;

use std::io;
use std::path::PathBuf;

pub use orchestrator::SyncEngine;
pub use reporting::SyncReporter;
use thiserror::Error;

/// Configuration for one sync or copy invocation
///
/// Built once from parsed CLI arguments and handed to the engine; there is
/// no ambient global configuration.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Worker pool size; `0` means host concurrency
    pub threads: usize,
    /// Whether destination files absent from the source are deleted
    pub delete_extraneous: bool,
    /// Ignore patterns applied to the source tree
    pub src_ignores: Vec<String>,
    /// Ignore patterns applied to the destination tree
    pub dst_ignores: Vec<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            threads: 0,
            delete_extraneous: true,
            src_ignores: Vec::new(),
            dst_ignores: Vec::new(),
        }
    }
}

/// Precondition failures that abort a whole invocation
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source path does not exist or is not a directory
    #[error("source directory does not exist: {0}")]
    SourceMissing(PathBuf),

    /// The destination directory is absent and could not be created
    #[error("failed to create destination directory {path}: {source}")]
    DestUncreatable {
        /// Destination directory that could not be created
        path: PathBuf,
        /// Underlying filesystem error
        source: io::Error,
    },

    /// The worker pool could not be constructed
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Outcome of one invocation with per-job statistics
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Files copied because they were new or changed
    pub copied: usize,
    /// Destination files deleted
    pub deleted: usize,
    /// Files found identical and left untouched
    pub up_to_date: usize,
    /// Per-job failures; they do not abort the invocation
    pub errors: Vec<String>,
    /// Non-fatal walk warnings from either root
    pub warnings: Vec<String>,
}

impl SyncResult {
    /// Number of filesystem mutations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.copied + self.deleted
    }

    /// Whether every job completed without error
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
