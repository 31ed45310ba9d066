//! # treesync
//!
//! Core library for one-way directory tree synchronization.
//!
//! This library makes a destination directory mirror a source directory:
//! new or changed files are copied, extraneous files are (optionally)
//! deleted, and gitignore-style exclusion rules decide which paths take
//! part in the sync at all.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the treesync library
pub mod error {
    /// Result type alias using `anyhow::Error`
    pub type Result<T> = anyhow::Result<T>;
}

/// Ignore rule storage and matching
pub mod rules;

/// Directory traversal and file collection
pub mod scanner;

/// Byte-for-byte file comparison
pub mod comparison;

/// One-way synchronization engine
pub mod sync;
