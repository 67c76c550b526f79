//! # Repack Filesystem Search (`common::fs::search`)
//!
//! File: cli/src/common/fs/search.rs
//!
//! ## Overview
//!
//! Locating things inside an extracted archive. Two flavours are needed:
//!
//! - **`find_matches`**: a shell glob evaluated relative to a base directory
//!   (`*.whl`, `pyclarius*/lib/*`, `**/cast_framework.framework`), using the
//!   `glob` crate. The base directory is escaped so workspace paths containing
//!   glob metacharacters are taken literally.
//! - **`find_by_file_name`**: a recursive walk (via `walkdir`) collecting every
//!   entry whose *file name* matches one of several patterns. A matched
//!   directory is not descended into, since it will be moved as a whole.
//!
use crate::core::error::Result;
use anyhow::Context;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Returns the sorted paths under `base` matching the relative glob `pattern`.
pub fn find_matches(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let base_str = base
        .to_str()
        .with_context(|| format!("Path is not valid UTF-8: {:?}", base))?;
    let full = format!("{}/{}", Pattern::escape(base_str), pattern);
    let mut matches = Vec::new();
    for entry in glob::glob(&full).with_context(|| format!("Invalid glob pattern '{}'", full))? {
        let path = entry.with_context(|| format!("Failed to read match of '{}'", full))?;
        trace!("Glob '{}' matched {:?}", pattern, path);
        matches.push(path);
    }
    matches.sort();
    Ok(matches)
}

/// Walks `base` recursively and returns entries whose file name matches any of
/// `patterns`, in walk order (sorted by name within a directory).
pub fn find_by_file_name(base: &Path, patterns: &[Pattern]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(base)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", base))?;
        let name = entry.file_name().to_string_lossy();
        if patterns.iter().any(|p| p.matches(&name)) {
            trace!("Found {:?}", entry.path());
            found.push(entry.path().to_path_buf());
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
        }
    }
    Ok(found)
}
