//! # Framework Archive Extraction
//!
//! File: cli/src/commands/repack/framework.rs
//!
//! Framework builders ship one `<sdk>_framework.framework` bundle somewhere
//! below the archive root (usually under a build configuration folder) next to
//! an optional `examples/` folder. The bundle is left in the working folder;
//! the bundler picks it up from there.
//!
use super::pipeline::{archive_name, Repacker};
use crate::common::fs::search;
use crate::core::error::{RepackError, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;

impl Repacker<'_> {
    /// Extracts a framework archive and returns its framework bundle directory.
    pub(super) fn extract_framework(&self, archive: &Path) -> Result<PathBuf> {
        let artifact_dir = self.working_dir(archive)?;
        self.tools.extract(archive, &artifact_dir, &[])?;

        self.sync_optional(&artifact_dir.join("examples"), &[self.layout.examples.as_path()])?;

        let pattern = format!("**/{}", Pattern::escape(&self.naming.framework_dir_name()));
        let mut matches = search::find_matches(&artifact_dir, &pattern)?;
        if matches.len() != 1 {
            anyhow::bail!(RepackError::UnexpectedCount {
                what: "framework folder",
                archive: archive_name(archive),
                found: matches.len(),
            });
        }
        let framework = matches.remove(0);
        debug!("Framework bundle of {:?}: {:?}", archive, framework);
        Ok(framework)
    }
}
