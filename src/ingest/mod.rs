// Raw archive ingestion — file discovery and JSON loading.
//
// An archive is a directory of JSON files, each holding an array of raw
// post records. Discovery uses a glob-style pattern (`*` and `?`
// wildcards). Read or parse failures at the file level are surfaced to
// the caller; per-record problems are the classifier's job, not ours.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex_lite::Regex;
use serde_json::Value;
use tracing::debug;

use crate::pipeline::classify::ClassifiedBatch;

/// Translate a glob-style pattern into an anchored regex.
/// `*` matches any run of characters, `?` exactly one.
fn pattern_to_regex(pattern: &str) -> Result<Regex> {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            c => {
                if matches!(
                    c,
                    '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\'
                ) {
                    regex.push('\\');
                }
                regex.push(c);
            }
        }
    }
    regex.push('$');
    Regex::new(&regex).with_context(|| format!("Invalid file pattern: {pattern}"))
}

/// Find files in `dir` whose names match the glob-style `pattern`.
/// Returned sorted by path so runs are deterministic.
pub fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = pattern_to_regex(pattern)?;
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if matcher.is_match(name) {
            paths.push(path);
        }
    }
    paths.sort();

    debug!(
        dir = %dir.display(),
        pattern = pattern,
        matched = paths.len(),
        "Discovered archive files"
    );
    Ok(paths)
}

/// Load one archive file as a JSON array of raw records.
pub fn load_file(path: &Path) -> Result<Vec<Value>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;

    match value {
        Value::Array(records) => Ok(records),
        _ => anyhow::bail!(
            "{} is not a JSON array of post records",
            path.display()
        ),
    }
}

/// Reload a previously written classification from its bucket files
/// (`originals.json`, `reposts.json`, `malformed.json` in `dir`).
/// A missing malformed bucket is treated as empty.
pub fn load_buckets(dir: &Path) -> Result<ClassifiedBatch> {
    let read_bucket = |name: &str| -> Result<String> {
        let path = dir.join(name);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read bucket {}", path.display()))
    };

    let originals = serde_json::from_str(&read_bucket("originals.json")?)
        .context("Failed to parse originals.json")?;
    let reposts = serde_json::from_str(&read_bucket("reposts.json")?)
        .context("Failed to parse reposts.json")?;

    let malformed_path = dir.join("malformed.json");
    let malformed = if malformed_path.is_file() {
        serde_json::from_str(&read_bucket("malformed.json")?)
            .context("Failed to parse malformed.json")?
    } else {
        Vec::new()
    };

    Ok(ClassifiedBatch {
        originals,
        reposts,
        malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_star_matches_archive_names() {
        let re = pattern_to_regex("*_data_*.json").unwrap();
        assert!(re.is_match("run1_data_0001.json"));
        assert!(re.is_match("x_data_.json"));
        assert!(!re.is_match("run1_data_0001.json.bak"));
        assert!(!re.is_match("notes.txt"));
    }

    #[test]
    fn glob_question_mark_matches_one_char() {
        let re = pattern_to_regex("part?.json").unwrap();
        assert!(re.is_match("part1.json"));
        assert!(!re.is_match("part10.json"));
    }
}
