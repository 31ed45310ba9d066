//! Directory traversal and file collection
//!
//! A [`Scanner`] walks one root directory exactly once and produces the
//! list of files taking part in a sync. `.gitignore` files are discovered
//! during the walk itself: a directory's ignore file is parsed before that
//! directory's entries are filtered, so its rules apply to everything
//! visited from that point on. Excluded directories are pruned outright;
//! their contents are never visited.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::rules::{self, IgnoreRule, RuleKind, RuleSet};

/// Name of the per-directory ignore file
const IGNORE_FILE_NAME: &str = ".gitignore";

/// Directory name excluded from every walk
const VCS_METADATA_DIR: &str = ".git";

/// Result of one walk with non-fatal warnings
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Absolute paths of all accepted files, in traversal order
    pub files: Vec<PathBuf>,
    /// Problems encountered that did not abort the walk
    pub warnings: Vec<String>,
}

/// Walks one root directory, filtering through an owned [`RuleSet`]
pub struct Scanner {
    root: String,
    rules: RuleSet,
}

impl Scanner {
    /// Create a scanner for `root` with externally supplied ignore patterns
    ///
    /// The root is normalized to the host separator with trailing
    /// separators stripped. A recursive directory-only rule for `.git` is
    /// seeded at the root, followed by one rule per supplied pattern.
    #[must_use]
    pub fn new(root: &Path, patterns: &[String]) -> Self {
        let mut root = rules::normalize_separators(&root.to_string_lossy());
        while root.ends_with('/') || root.ends_with('\\') {
            root.pop();
        }

        let mut rule_set = RuleSet::new();
        rule_set.push(IgnoreRule {
            base: root.clone(),
            pattern: VCS_METADATA_DIR.to_string(),
            recursive: true,
            kind: RuleKind::DirOnly,
        });
        for pattern in patterns {
            if let Some(rule) = rules::parse_pattern(pattern, &root) {
                rule_set.push(rule);
            }
        }

        Self {
            root,
            rules: rule_set,
        }
    }

    /// The normalized root this scanner walks
    #[must_use]
    pub fn root(&self) -> &Path {
        Path::new(&self.root)
    }

    /// Express `path` relative to the root; empty if not under it
    #[must_use]
    pub fn relative_path(&self, path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        if path_str.len() > self.root.len() && path_str.starts_with(self.root.as_str()) {
            PathBuf::from(&path_str[self.root.len() + 1..])
        } else {
            PathBuf::new()
        }
    }

    /// Walk the root once, collecting every file no rule excludes
    ///
    /// An unreadable directory yields an empty subtree and a warning
    /// rather than aborting the walk.
    pub fn scan(&mut self) -> ScanResult {
        let mut result = ScanResult {
            files: Vec::new(),
            warnings: Vec::new(),
        };
        let root = PathBuf::from(self.root.clone());
        self.walk_dir(&root, &mut result);
        result
    }

    fn walk_dir(&mut self, dir: &Path, result: &mut ScanResult) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("skipping unreadable directory {}: {e}", dir.display());
                result
                    .warnings
                    .push(format!("Failed to list directory {}: {e}", dir.display()));
                return;
            }
        };

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry in {}: {e}", dir.display());
                    result
                        .warnings
                        .push(format!("Failed to read entry in {}: {e}", dir.display()));
                    continue;
                }
            };
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            } else {
                files.push(path);
            }
        }

        // The directory's own ignore file takes effect before anything in
        // the directory is filtered.
        for file in &files {
            if file.file_name().is_some_and(|n| n == IGNORE_FILE_NAME) {
                if let Err(e) = rules::parse_file(file, &mut self.rules) {
                    warn!("{e:#}");
                    result.warnings.push(format!("{e:#}"));
                }
            }
        }

        for file in files {
            if !self.rules.matches(&file, false) {
                result.files.push(file);
            }
        }

        for sub_dir in dirs {
            if !self.rules.matches(&sub_dir, true) {
                self.walk_dir(&sub_dir, result);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn relative_set(scanner: &Scanner, result: &ScanResult) -> HashSet<PathBuf> {
        result
            .files
            .iter()
            .map(|f| scanner.relative_path(f))
            .collect()
    }

    #[test]
    fn test_scan_collects_nested_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::create_dir_all(tmp.path().join("sub/deeper")).unwrap();
        fs::write(tmp.path().join("sub/b.txt"), "b").unwrap();
        fs::write(tmp.path().join("sub/deeper/c.txt"), "c").unwrap();

        let mut scanner = Scanner::new(tmp.path(), &[]);
        let result = scanner.scan();

        assert!(result.warnings.is_empty());
        assert_eq!(
            relative_set(&scanner, &result),
            HashSet::from([
                PathBuf::from("a.txt"),
                PathBuf::from("sub/b.txt"),
                PathBuf::from("sub/deeper/c.txt"),
            ])
        );
    }

    #[test]
    fn test_git_directory_is_always_pruned() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".git/objects")).unwrap();
        fs::write(tmp.path().join(".git/config"), "x").unwrap();
        fs::write(tmp.path().join(".git/objects/ab"), "x").unwrap();
        fs::write(tmp.path().join("kept.txt"), "x").unwrap();

        let mut scanner = Scanner::new(tmp.path(), &[]);
        let result = scanner.scan();

        assert_eq!(
            relative_set(&scanner, &result),
            HashSet::from([PathBuf::from("kept.txt")])
        );
    }

    #[test]
    fn test_gitignore_filters_own_directory_and_below() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), "*.log\n").unwrap();
        fs::write(tmp.path().join("app.log"), "x").unwrap();
        fs::write(tmp.path().join("app.txt"), "x").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/deep.log"), "x").unwrap();

        let mut scanner = Scanner::new(tmp.path(), &[]);
        let result = scanner.scan();

        let files = relative_set(&scanner, &result);
        assert!(files.contains(&PathBuf::from("app.txt")));
        assert!(files.contains(&PathBuf::from(".gitignore")));
        assert!(!files.contains(&PathBuf::from("app.log")));
        assert!(!files.contains(&PathBuf::from("sub/deep.log")));
    }

    #[test]
    fn test_nested_gitignore_scopes_to_its_subtree() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/.gitignore"), "*.tmp\n").unwrap();
        fs::write(tmp.path().join("root.tmp"), "x").unwrap();
        fs::write(tmp.path().join("sub/scratch.tmp"), "x").unwrap();

        let mut scanner = Scanner::new(tmp.path(), &[]);
        let result = scanner.scan();

        let files = relative_set(&scanner, &result);
        assert!(files.contains(&PathBuf::from("root.tmp")));
        assert!(!files.contains(&PathBuf::from("sub/scratch.tmp")));
    }

    #[test]
    fn test_directory_rule_prunes_entire_subtree() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), "node_modules/\n").unwrap();
        fs::create_dir_all(tmp.path().join("node_modules/pkg")).unwrap();
        fs::write(tmp.path().join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(tmp.path().join("node_modules/readme.md"), "x").unwrap();
        fs::write(tmp.path().join("main.js"), "x").unwrap();

        let mut scanner = Scanner::new(tmp.path(), &[]);
        let result = scanner.scan();

        let files = relative_set(&scanner, &result);
        assert!(files.contains(&PathBuf::from("main.js")));
        assert!(!files.iter().any(|f| f.starts_with("node_modules")));
    }

    #[test]
    fn test_cli_patterns_apply_at_any_depth() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("a.log"), "x").unwrap();
        fs::write(tmp.path().join("sub/b.log"), "x").unwrap();
        fs::write(tmp.path().join("sub/c.txt"), "x").unwrap();

        let mut scanner = Scanner::new(tmp.path(), &["*.log".to_string()]);
        let result = scanner.scan();

        assert_eq!(
            relative_set(&scanner, &result),
            HashSet::from([PathBuf::from("sub/c.txt")])
        );
    }

    #[test]
    fn test_relative_path_outside_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let scanner = Scanner::new(tmp.path(), &[]);

        assert_eq!(
            scanner.relative_path(&tmp.path().join("a/b.txt")),
            PathBuf::from("a/b.txt")
        );
        assert_eq!(
            scanner.relative_path(Path::new("/elsewhere/b.txt")),
            PathBuf::new()
        );
        assert_eq!(scanner.relative_path(tmp.path()), PathBuf::new());
    }

    #[test]
    fn test_trailing_separators_are_stripped_from_root() {
        let tmp = TempDir::new().unwrap();
        let with_slash = format!("{}//", tmp.path().display());
        let scanner = Scanner::new(Path::new(&with_slash), &[]);

        assert_eq!(scanner.root(), tmp.path());
    }

    #[test]
    fn test_missing_root_warns_instead_of_failing() {
        let tmp = TempDir::new().unwrap();
        let mut scanner = Scanner::new(&tmp.path().join("gone"), &[]);
        let result = scanner.scan();

        assert!(result.files.is_empty());
        assert_eq!(result.warnings.len(), 1);
    }
}
