//! Sync orchestration - walks, diffs, and schedules jobs
//!
//! Both walks run sequentially on the calling thread and finish before any
//! job starts; the job set is then an immutable snapshot handed to the
//! worker pool. The engine blocks until the pool drains.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use rayon::prelude::*;

use super::executor::{JobExecutor, JobOutcome, SyncJob};
use super::{SyncError, SyncOptions, SyncResult};
use crate::scanner::Scanner;

/// One-way sync engine driven by a [`SyncOptions`] value
pub struct SyncEngine {
    options: SyncOptions,
}

impl SyncEngine {
    /// Create an engine for one invocation
    #[must_use]
    pub const fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    /// Make `dest_root` mirror `source_root`
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::SourceMissing`] if the source is not a
    /// directory and [`SyncError::DestUncreatable`] if an absent
    /// destination cannot be created. Per-job failures are collected in
    /// the returned [`SyncResult`] instead.
    pub fn sync(&self, source_root: &Path, dest_root: &Path) -> Result<SyncResult, SyncError> {
        if !source_root.is_dir() {
            return Err(SyncError::SourceMissing(source_root.to_path_buf()));
        }
        if !dest_root.is_dir() {
            fs::create_dir_all(dest_root).map_err(|source| SyncError::DestUncreatable {
                path: dest_root.to_path_buf(),
                source,
            })?;
        }

        let mut source_scanner = Scanner::new(source_root, &self.options.src_ignores);
        let mut dest_scanner = Scanner::new(dest_root, &self.options.dst_ignores);
        let source_scan = source_scanner.scan();
        let dest_scan = dest_scanner.scan();

        let source_relative: HashSet<PathBuf> = source_scan
            .files
            .iter()
            .map(|file| source_scanner.relative_path(file))
            .collect();

        let mut jobs = Vec::new();

        if self.options.delete_extraneous {
            for file in &dest_scan.files {
                let relative = dest_scanner.relative_path(file);
                if !source_relative.contains(&relative) {
                    jobs.push(SyncJob::Delete {
                        path: file.clone(),
                        relative,
                    });
                }
            }
        }

        for file in &source_scan.files {
            let relative = source_scanner.relative_path(file);
            let dest = dest_scanner.root().join(&relative);
            jobs.push(SyncJob::Copy {
                source: file.clone(),
                dest,
                relative,
            });
        }

        let outcomes = self.run_jobs(&jobs)?;

        let mut result = SyncResult::default();
        result.warnings.extend(source_scan.warnings);
        result.warnings.extend(dest_scan.warnings);
        Self::tally(&mut result, outcomes);
        Ok(result)
    }

    /// Copy a single file or a whole tree; never deletes
    ///
    /// A directory source behaves like [`SyncEngine::sync`] with deletion
    /// disabled. A file source is copied directly, into the destination
    /// directory when one exists, otherwise to the destination path itself.
    ///
    /// # Errors
    ///
    /// Same precondition errors as [`SyncEngine::sync`]; a source that is
    /// neither file nor directory yields [`SyncError::SourceMissing`].
    pub fn copy_path(&self, source: &Path, dest: &Path) -> Result<SyncResult, SyncError> {
        if !source.is_file() {
            let engine = Self::new(SyncOptions {
                delete_extraneous: false,
                ..self.options.clone()
            });
            return engine.sync(source, dest);
        }

        let relative = source.file_name().map(PathBuf::from).unwrap_or_default();
        let dest = if dest.is_dir() {
            dest.join(&relative)
        } else {
            dest.to_path_buf()
        };

        let job = SyncJob::Copy {
            source: source.to_path_buf(),
            dest,
            relative,
        };
        let mut result = SyncResult::default();
        Self::tally(&mut result, vec![JobExecutor::run(&job)]);
        Ok(result)
    }

    /// Run all jobs on a bounded pool, blocking until every one completes
    fn run_jobs(&self, jobs: &[SyncJob]) -> Result<Vec<JobOutcome>, SyncError> {
        let threads = if self.options.threads == 0 {
            thread::available_parallelism().map_or(1, usize::from)
        } else {
            self.options.threads
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;

        Ok(pool.install(|| jobs.par_iter().map(JobExecutor::run).collect()))
    }

    fn tally(result: &mut SyncResult, outcomes: Vec<JobOutcome>) {
        for outcome in outcomes {
            match outcome {
                JobOutcome::Copied => result.copied += 1,
                JobOutcome::UpToDate => result.up_to_date += 1,
                JobOutcome::Deleted => result.deleted += 1,
                JobOutcome::Failed(message) => result.errors.push(message),
            }
        }
    }
}
