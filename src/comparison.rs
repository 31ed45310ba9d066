//! Byte-for-byte file comparison
//!
//! Equality is decided purely on content: no hashing and no
//! modification-time shortcut. Size is checked first, small files are
//! compared in one read, and larger files are streamed in fixed-size
//! chunks so neither file is ever held in memory whole.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context;

use crate::error::Result;

/// Files below this size (bytes) are compared in a single read
const SMALL_FILE_THRESHOLD: u64 = 8192;

/// Chunk size (bytes) for the streaming comparison
const CHUNK_SIZE: usize = 1024;

/// Whole-file equality tester
pub struct FileComparator;

impl FileComparator {
    /// Decide whether `src` and `dst` hold identical bytes
    ///
    /// A missing `dst` counts as different (it needs a copy). A size
    /// mismatch short-circuits without reading either file.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be opened or read.
    pub fn are_equal(src: &Path, dst: &Path) -> Result<bool> {
        if !dst.exists() {
            return Ok(false);
        }

        let src_len = fs::metadata(src)
            .with_context(|| format!("Failed to stat file: {}", src.display()))?
            .len();
        let dst_len = fs::metadata(dst)
            .with_context(|| format!("Failed to stat file: {}", dst.display()))?
            .len();
        if src_len != dst_len {
            return Ok(false);
        }

        if src_len < SMALL_FILE_THRESHOLD && dst_len < SMALL_FILE_THRESHOLD {
            let src_bytes = fs::read(src)
                .with_context(|| format!("Failed to read file: {}", src.display()))?;
            let dst_bytes = fs::read(dst)
                .with_context(|| format!("Failed to read file: {}", dst.display()))?;
            return Ok(src_bytes == dst_bytes);
        }

        Self::streams_equal(src, dst)
    }

    /// Compare two files chunk by chunk until either is exhausted
    fn streams_equal(src: &Path, dst: &Path) -> Result<bool> {
        let mut src_reader = BufReader::new(
            File::open(src).with_context(|| format!("Failed to open file: {}", src.display()))?,
        );
        let mut dst_reader = BufReader::new(
            File::open(dst).with_context(|| format!("Failed to open file: {}", dst.display()))?,
        );

        let mut src_buf = [0u8; CHUNK_SIZE];
        let mut dst_buf = [0u8; CHUNK_SIZE];

        loop {
            let src_read = read_full(&mut src_reader, &mut src_buf)
                .with_context(|| format!("Failed to read file: {}", src.display()))?;
            let dst_read = read_full(&mut dst_reader, &mut dst_buf)
                .with_context(|| format!("Failed to read file: {}", dst.display()))?;

            if src_read != dst_read || src_buf[..src_read] != dst_buf[..dst_read] {
                return Ok(false);
            }
            if src_read == 0 {
                return Ok(true);
            }
        }
    }
}

/// Read until `buf` is full or the stream ends; returns bytes read
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        let n = reader.read(&mut buf[total..])?;
        if n == 0 {
            break;
        }
        total += n;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_destination_is_different() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        fs::write(&src, "content").unwrap();

        assert!(!FileComparator::are_equal(&src, &tmp.path().join("gone.txt")).unwrap());
    }

    #[test]
    fn test_identical_small_files_are_equal() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::write(&a, "same content").unwrap();
        fs::write(&b, "same content").unwrap();

        assert!(FileComparator::are_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_same_size_different_content_is_unequal() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::write(&a, "content A").unwrap();
        fs::write(&b, "content B").unwrap();

        assert!(!FileComparator::are_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_size_mismatch_is_unequal() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::write(&a, "short").unwrap();
        fs::write(&b, "a little bit longer").unwrap();

        assert!(!FileComparator::are_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_large_files_compared_in_chunks() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        // Well above the small-file threshold, not chunk-aligned
        let content = vec![0xabu8; 20_000 + 37];
        fs::write(&a, &content).unwrap();
        fs::write(&b, &content).unwrap();

        assert!(FileComparator::are_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_single_byte_mutation_flips_result() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        let content = vec![0x5au8; 20_000];
        fs::write(&a, &content).unwrap();
        fs::copy(&a, &b).unwrap();

        assert!(FileComparator::are_equal(&a, &b).unwrap());

        let mut mutated = content;
        mutated[15_000] ^= 0xff;
        fs::write(&b, &mutated).unwrap();

        assert!(!FileComparator::are_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_empty_files_are_equal() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();

        assert!(FileComparator::are_equal(&a, &b).unwrap());
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let b = tmp.path().join("b");
        fs::write(&b, "x").unwrap();

        assert!(FileComparator::are_equal(&tmp.path().join("gone"), &b).is_err());
    }
}
