//! # Asset Compression
//!
//! File: cli/src/commands/repack/compress.rs
//!
//! Every populated staging folder becomes `assets/<asset>.zip`. The archive is
//! built from inside the folder so its entries are relative to the asset root.
//!
use super::pipeline::{archive_name, Repacker};
use crate::common::fs::io::remove_file_if_exists;
use crate::core::error::Result;
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::warn;

impl Repacker<'_> {
    /// Compresses each staging folder of `asset_dirs` and returns the asset files.
    pub(super) fn compress_assets(&self, asset_dirs: &BTreeSet<PathBuf>) -> Result<Vec<PathBuf>> {
        let total = asset_dirs.len();
        let mut assets = Vec::with_capacity(total);
        for (index, dir) in asset_dirs.iter().enumerate() {
            let asset_name = archive_name(dir);
            let asset_file = self.layout.assets.join(format!("{}.zip", asset_name));
            if remove_file_if_exists(&asset_file)? {
                warn!("Replaced stale asset {}", asset_file.display());
            }

            println!("[{}/{}] Compressing asset: {}", index + 1, total, asset_name);
            self.tools
                .compress(&asset_file, dir, self.workspace)
                .with_context(|| format!("Failed to compress asset '{}'", asset_name))?;
            assets.push(asset_file);
        }
        Ok(assets)
    }
}
