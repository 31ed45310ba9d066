//! Gitignore-style line parsing
//!
//! Translates the subset of the gitignore grammar this tool understands
//! into [`IgnoreRule`]s: `#` comments, blank lines, a leading `/` anchoring
//! a rule to the ignore file's own directory, a trailing `/` restricting it
//! to directories, and a leading `*` turning it into a dot-suffix wildcard.
//! Negation (`!`) and glob metacharacters beyond the leading `*` are not
//! supported.

use std::fs;
use std::path::{Path, MAIN_SEPARATOR};

use anyhow::Context;

use super::{normalize_separators, IgnoreRule, RuleKind, RuleSet};
use crate::error::Result;

/// Parse one `.gitignore` file, appending its rules to `set`
///
/// Rules are anchored to the ignore file's own directory. Malformed or
/// empty lines contribute no rule.
///
/// # Errors
///
/// Returns an error if the ignore file cannot be read.
pub fn parse_file(path: &Path, set: &mut RuleSet) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ignore file: {}", path.display()))?;

    let base = path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    for line in contents.lines() {
        if let Some(rule) = parse_line(line, &base) {
            set.push(rule);
        }
    }

    Ok(())
}

/// Parse one CLI-supplied ignore pattern, anchored at the walked root
///
/// The line grammar is the same as in ignore files, except the resulting
/// rule always applies at any depth under the root.
#[must_use]
pub fn parse_pattern(pattern: &str, root: &str) -> Option<IgnoreRule> {
    parse_line(pattern, root).map(|mut rule| {
        rule.recursive = true;
        rule
    })
}

/// Parse one ignore line against the directory it is scoped to
///
/// Returns `None` for comments, blank lines, and lines that reduce to an
/// empty pattern after stripping.
#[must_use]
pub fn parse_line(line: &str, base_dir: &str) -> Option<IgnoreRule> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    // Separators inside the line are normalized before any structural check.
    let mut line = line.replace('\\', "/");

    let mut base = base_dir.to_string();

    // A leading separator anchors the rule to this directory's direct
    // children; everything else applies at any depth below it.
    let recursive = !line.starts_with('/');
    if !recursive {
        line = line[1..].trim().to_string();
        if line.is_empty() {
            return None;
        }
    }

    let kind;
    if line.ends_with('/') {
        kind = RuleKind::DirOnly;
        line.truncate(line.rfind('/').unwrap_or(0));
    } else if let Some(stripped) = line.strip_prefix('*') {
        kind = RuleKind::Wildcard;
        line = stripped.to_string();
    } else {
        kind = RuleKind::Either;
    }

    if line.is_empty() {
        return None;
    }

    // An embedded separator re-anchors the rule: `foo/bar.txt` lives at
    // `base/foo` and matches the name `bar.txt`.
    if let Some(pos) = line.rfind('/') {
        if pos > 0 {
            base = format!("{base}{MAIN_SEPARATOR}{}", &line[..pos]);
            line = line[pos + 1..].to_string();
        }
    }
    if line.is_empty() {
        return None;
    }

    Some(IgnoreRule {
        base: normalize_separators(&base),
        pattern: line,
        recursive,
        kind,
    })
}
