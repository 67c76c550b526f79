//! # Repack Filesystem Move Operations
//!
//! File: cli/src/common/fs/relocate.rs
//!
//! ## Overview
//!
//! Moving extracted binaries and library folders into staging folders. A move
//! is a `rename` whenever possible, so symbolic links (`libcast.so ->
//! libcast.so.12`) are carried over as links. When the rename fails (source
//! and destination on different devices) the move falls back to `fs_extra`,
//! which copies and then deletes the source.
//!
use crate::core::error::{RepackError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Moves `source` (file, link or directory) into `dest_dir`, keeping its name.
///
/// Returns the new path.
pub fn move_into(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .with_context(|| format!("Cannot move {:?}: path has no file name", source))?;
    let target = dest_dir.join(name);
    move_to(source, &target)?;
    Ok(target)
}

/// Moves `source` to exactly `target`.
///
/// # Errors
///
/// - `RepackError::FileSystem` if `target` already exists (nothing is overwritten).
/// - Any I/O error from the rename or the copy fallback.
pub fn move_to(source: &Path, target: &Path) -> Result<()> {
    if target.symlink_metadata().is_ok() {
        anyhow::bail!(RepackError::FileSystem(format!(
            "Refusing to overwrite existing path {:?} while moving {:?}",
            target, source
        )));
    }
    match fs::rename(source, target) {
        Ok(()) => {
            debug!("Moved {:?} -> {:?}", source, target);
            Ok(())
        }
        Err(e) => {
            warn!(
                "Rename {:?} -> {:?} failed ({}), falling back to copy and delete",
                source, target, e
            );
            copy_then_remove(source, target)
        }
    }
}

fn copy_then_remove(source: &Path, target: &Path) -> Result<()> {
    if source.is_dir() {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.copy_inside = true;
        fs_extra::dir::move_dir(source, target, &options).map_err(|e| {
            anyhow::anyhow!(e).context(format!("Failed to move dir {:?} to {:?}", source, target))
        })?;
    } else {
        let options = fs_extra::file::CopyOptions::new();
        fs_extra::file::move_file(source, target, &options).map_err(|e| {
            anyhow::anyhow!(e).context(format!("Failed to move file {:?} to {:?}", source, target))
        })?;
    }
    Ok(())
}
