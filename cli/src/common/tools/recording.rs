//! # Recording Toolbox (test double)
//!
//! File: cli/src/common/tools/recording.rs
//!
//! A `Toolbox` that never spawns a process. Archives are registered up front
//! as plain fixture directories keyed by archive file name; `extract` copies
//! the fixture (optionally filtered by member wildcards), `compress` copies the
//! folder into a *directory* at the archive path so tests can inspect the
//! asset content, `sync` merges directory contents and `bundle_frameworks`
//! writes a listing of its inputs. Every call is recorded.
//!
use super::Toolbox;
use crate::core::error::Result;
use anyhow::Context;
use glob::Pattern;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Extract { archive: String, members: Vec<String> },
    Compress { archive: String },
    Sync { source: PathBuf, dest: PathBuf },
    Bundle { frameworks: Vec<PathBuf>, output: PathBuf },
}

#[derive(Debug, Default)]
pub struct RecordingToolbox {
    fixtures: HashMap<String, PathBuf>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingToolbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `contents` as the content of any archive named `archive_name`.
    pub fn with_archive(mut self, archive_name: &str, contents: &Path) -> Self {
        self.fixtures
            .insert(archive_name.to_string(), contents.to_path_buf());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn extract_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Extract { .. }))
            .count()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Copies the content of `source` into `dest`, keeping entries whose relative
/// path matches one of `filters` (all entries when `filters` is empty).
pub fn copy_tree(source: &Path, dest: &Path, filters: &[Pattern]) -> Result<()> {
    fs::create_dir_all(dest)?;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(source)?;
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            if filters.is_empty() {
                fs::create_dir_all(&target)?;
            }
            continue;
        }
        if !filters.is_empty() && !filters.iter().any(|p| p.matches(&rel_str)) {
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)
            .with_context(|| format!("Failed to copy fixture {:?}", entry.path()))?;
    }
    Ok(())
}

impl Toolbox for RecordingToolbox {
    fn extract(&self, archive: &Path, dest: &Path, members: &[&str]) -> Result<()> {
        let name = file_name(archive);
        self.calls.borrow_mut().push(Call::Extract {
            archive: name.clone(),
            members: members.iter().map(|m| m.to_string()).collect(),
        });
        let fixture = self
            .fixtures
            .get(&name)
            .with_context(|| format!("No fixture registered for archive '{}'", name))?;
        let filters = members
            .iter()
            .map(|m| Pattern::new(m))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        copy_tree(fixture, dest, &filters)
    }

    fn compress(&self, archive: &Path, dir: &Path, _scratch: &Path) -> Result<()> {
        self.calls.borrow_mut().push(Call::Compress {
            archive: file_name(archive),
        });
        copy_tree(dir, archive, &[])
    }

    fn sync(&self, source: &Path, dest: &Path) -> Result<()> {
        self.calls.borrow_mut().push(Call::Sync {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
        });
        copy_tree(source, dest, &[])
    }

    fn bundle_frameworks(&self, frameworks: &[PathBuf], output: &Path) -> Result<()> {
        self.calls.borrow_mut().push(Call::Bundle {
            frameworks: frameworks.to_vec(),
            output: output.to_path_buf(),
        });
        fs::create_dir_all(output)?;
        let listing: Vec<String> = frameworks
            .iter()
            .map(|f| f.display().to_string())
            .collect();
        fs::write(output.join("frameworks.txt"), listing.join("\n"))?;
        Ok(())
    }
}
