//! # Output Layout and Workspace
//!
//! File: cli/src/commands/repack/layout.rs
//!
//! ## Overview
//!
//! - `OutputLayout`: the four shared destinations under the output directory
//!   (`assets/`, `examples/`, `include/`, `doc/`). They accumulate content from
//!   every processed archive.
//! - `Workspace`: the per-run directory holding working folders (one per
//!   archive) and staging folders (one per asset). A scoped workspace is
//!   removed when dropped, including when the run fails; a kept workspace is
//!   left on disk for inspection.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;
use tracing::info;

/// Shared output folders, all absolute.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub assets: PathBuf,
    pub examples: PathBuf,
    pub headers: PathBuf,
    pub docs: PathBuf,
}

impl OutputLayout {
    /// Creates (if absent) the shared folders under `output_dir`.
    pub fn create(output_dir: &Path) -> Result<Self> {
        let root = std::path::absolute(output_dir)
            .with_context(|| format!("Failed to resolve output directory {:?}", output_dir))?;
        let layout = Self {
            assets: root.join("assets"),
            examples: root.join("examples"),
            headers: root.join("include"),
            docs: root.join("doc"),
        };
        for dir in [&layout.assets, &layout.examples, &layout.headers, &layout.docs] {
            ensure_dir_exists(dir)?;
        }
        Ok(layout)
    }
}

/// Directory holding every working and staging folder of one run.
#[derive(Debug)]
pub enum Workspace {
    /// Removed on drop.
    Scoped(TempDir),
    /// Left on disk after the run.
    Kept(PathBuf),
}

impl Workspace {
    /// Creates a fresh, uniquely named workspace under `root`.
    pub fn create(root: &Path, keep: bool) -> Result<Self> {
        ensure_dir_exists(root)?;
        let root = std::path::absolute(root)
            .with_context(|| format!("Failed to resolve temp root {:?}", root))?;
        let workspace = if keep {
            Workspace::Kept(create_unique_dir(&root)?)
        } else {
            Workspace::Scoped(
                tempfile::Builder::new()
                    .prefix("repack-")
                    .tempdir_in(&root)
                    .with_context(|| format!("Failed to create workspace in {:?}", root))?,
            )
        };
        info!("Workspace: {}", workspace.path().display());
        Ok(workspace)
    }

    pub fn path(&self) -> &Path {
        match self {
            Workspace::Scoped(dir) => dir.path(),
            Workspace::Kept(path) => path.as_path(),
        }
    }
}

fn create_unique_dir(root: &Path) -> Result<PathBuf> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    for attempt in 0..100u32 {
        let candidate = root.join(format!(
            "repack-{}-{}-{}",
            std::process::id(),
            nanos,
            attempt
        ));
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to create workspace {:?}", candidate))
            }
        }
    }
    anyhow::bail!("Could not find a free workspace name under {:?}", root)
}
