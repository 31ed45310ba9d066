//! Ignore rule storage and matching
//!
//! A [`RuleSet`] holds the exclusion rules collected for one walked root:
//! the built-in `.git` rule, rules supplied on the command line, and rules
//! parsed out of `.gitignore` files discovered during the walk. A path is
//! excluded as soon as any stored rule matches it; there is no negation or
//! precedence between rules.

mod parser;

use std::path::{Path, MAIN_SEPARATOR};

pub use parser::{parse_file, parse_line, parse_pattern};

/// What a rule's pattern is allowed to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Files whose name equals the pattern
    FileOnly,
    /// Directories whose name equals the pattern (prunes the whole subtree)
    DirOnly,
    /// Files or directories whose name equals the pattern
    Either,
    /// Files whose name or dot-suffix equals the pattern (`*.log` style)
    Wildcard,
}

/// A single exclusion rule anchored to a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    /// Normalized absolute directory the rule is scoped to
    pub base: String,
    /// Name (or dot-suffix for [`RuleKind::Wildcard`]) to match
    pub pattern: String,
    /// Whether the rule applies at any depth under `base`,
    /// rather than to direct children only
    pub recursive: bool,
    /// What kind of entries the rule applies to
    pub kind: RuleKind,
}

/// Ordered collection of exclusion rules for one root
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<IgnoreRule>,
}

impl RuleSet {
    /// Create an empty rule set
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; rules are immutable once stored
    pub fn push(&mut self, rule: IgnoreRule) {
        self.rules.push(rule);
    }

    /// Number of stored rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check whether any stored rule excludes `path`
    ///
    /// Evaluation short-circuits on the first matching rule. Matching never
    /// mutates the set, so repeated calls for the same path agree.
    #[must_use]
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        let path_str = path.to_string_lossy();
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => return false,
        };
        let parent = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.rules
            .iter()
            .any(|rule| rule.applies(&path_str, &parent, &file_name, is_dir))
    }
}

impl IgnoreRule {
    fn applies(&self, path: &str, parent: &str, file_name: &str, is_dir: bool) -> bool {
        // Scope: the path must lie under the rule's anchor.
        if !path.starts_with(&self.base) {
            return false;
        }

        // Non-recursive rules only see direct children of the anchor.
        if !self.recursive && parent != self.base {
            return false;
        }

        match self.kind {
            RuleKind::Wildcard => {
                file_name == self.pattern || dot_suffix(file_name) == Some(&self.pattern[..])
            }
            RuleKind::DirOnly => is_dir && file_name == self.pattern,
            RuleKind::FileOnly => !is_dir && file_name == self.pattern,
            RuleKind::Either => file_name == self.pattern,
        }
    }
}

/// Suffix of `name` beginning at the last `.`, dot included
fn dot_suffix(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[idx..])
}

/// Convert both separator styles to the host's canonical path separator
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    if MAIN_SEPARATOR == '\\' {
        path.replace('/', "\\")
    } else {
        path.replace('\\', "/")
    }
}
