//! # Framework Bundling
//!
//! File: cli/src/commands/repack/bundle.rs
//!
//! Merges the per-platform framework bundles of one asset into a single
//! `<vendor>_<sdk>.xcframework` inside that asset's staging folder.
//!
use super::pipeline::Repacker;
use crate::core::error::Result;
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

impl Repacker<'_> {
    /// Bundles `frameworks` into the staging folder of `asset_name` and returns it.
    pub(super) fn bundle_frameworks(&self, asset_name: &str, frameworks: &[PathBuf]) -> Result<PathBuf> {
        let asset_dir = self.staging_dir(asset_name)?;
        let output = asset_dir.join(self.naming.xcframework_name());
        info!(
            "Bundling {} framework(s) into {}",
            frameworks.len(),
            output.display()
        );
        self.tools
            .bundle_frameworks(frameworks, &output)
            .with_context(|| format!("Failed to bundle frameworks for '{}'", asset_name))?;
        Ok(asset_dir)
    }
}
