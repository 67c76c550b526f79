//! # Library Archive Extraction
//!
//! File: cli/src/commands/repack/library.rs
//!
//! Native SDK archives are laid out as:
//!
//! ```text
//! .
//! ├── doc/javadoc      (aar Android archives only)
//! ├── examples
//! ├── include
//! └── ...              (binaries anywhere below)
//! ```
//!
//! Headers go to the staging folder and to the shared `include/`, examples to
//! the shared `examples/`, Android API docs to `doc/reference/android/<version>`
//! and binaries are moved (not copied) into the staging folder.
//!
use super::pipeline::Repacker;
use crate::common::fs::{io::ensure_dir_exists, relocate, search};
use crate::core::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Archive name marker of the Android builds that ship API documentation.
const ANDROID_DOC_MARKER: &str = "sdk_aar_Android";

impl Repacker<'_> {
    /// Extracts a library archive and returns the staging folder of `asset_name`.
    pub(super) fn extract_library(&self, archive: &Path, asset_name: &str) -> Result<PathBuf> {
        let asset_dir = self.staging_dir(asset_name)?;
        let artifact_dir = self.working_dir(archive)?;
        self.tools.extract(archive, &artifact_dir, &[])?;

        self.sync_optional(
            &artifact_dir.join("include"),
            &[asset_dir.as_path(), self.layout.headers.as_path()],
        )?;
        self.sync_optional(&artifact_dir.join("examples"), &[self.layout.examples.as_path()])?;

        if let Some((from_dir, to_dir)) = self.doc_folders(archive, &artifact_dir) {
            ensure_dir_exists(&to_dir)?;
            self.sync_optional(&from_dir, &[to_dir.as_path()])?;
        }

        for binary in search::find_by_file_name(&artifact_dir, self.classifier.binary_patterns())? {
            let moved = relocate::move_into(&binary, &asset_dir)?;
            debug!("Binary {:?} staged as {:?}", binary, moved);
        }
        Ok(asset_dir)
    }

    /// Source and destination of the documentation carried by `archive`, if any.
    fn doc_folders(&self, archive: &Path, artifact_dir: &Path) -> Option<(PathBuf, PathBuf)> {
        let name = archive.file_name()?.to_string_lossy();
        if !name.contains(ANDROID_DOC_MARKER) {
            return None;
        }
        Some((
            artifact_dir.join("doc").join("javadoc"),
            self.layout.docs.join(self.naming.android_doc_dir()),
        ))
    }
}
