//! # Repack Pipeline
//!
//! File: cli/src/commands/repack/pipeline.rs
//!
//! ## Overview
//!
//! `Repacker` drives one run:
//!
//! 1. List the `*.zip` files of the input directory (sorted by name)
//! 2. Abort if a library pattern matches several archives
//! 3. Classify each archive and dispatch it to the extractor of its family;
//!    unknown archives are skipped with a warning
//! 4. Optionally bundle the framework groups
//! 5. Compress every staging folder into `assets/<asset>.zip`
//!
//! The extractors live in sibling modules (`library`, `framework`, `wheel`,
//! `bundle`, `compress`) as further `impl Repacker` blocks and share the
//! helpers defined here.
//!
//! Everything is sequential. The first error aborts the run.
//!
use super::layout::OutputLayout;
use super::naming::Naming;
use super::patterns::{ArtifactFamily, Classifier};
use crate::common::fs::io::{ensure_dir_exists, list_files_with_extension};
use crate::common::tools::Toolbox;
use crate::core::error::Result;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a run produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepackReport {
    /// Compressed asset files, in asset-name order.
    pub assets: Vec<PathBuf>,
    /// Archives that matched no pattern.
    pub skipped: Vec<String>,
    /// Framework assets extracted but not bundled (bundling disabled).
    pub unbundled: Vec<String>,
}

pub struct Repacker<'a> {
    pub(super) tools: &'a dyn Toolbox,
    pub(super) classifier: &'a Classifier,
    pub(super) naming: &'a Naming,
    pub(super) layout: &'a OutputLayout,
    pub(super) workspace: &'a Path,
}

impl<'a> Repacker<'a> {
    pub fn new(
        tools: &'a dyn Toolbox,
        classifier: &'a Classifier,
        naming: &'a Naming,
        layout: &'a OutputLayout,
        workspace: &'a Path,
    ) -> Self {
        Self {
            tools,
            classifier,
            naming,
            layout,
            workspace,
        }
    }

    /// Repacks every archive of `input_dir` into the output layout.
    pub fn run(&self, input_dir: &Path, bundle_frameworks: bool) -> Result<RepackReport> {
        let archives = list_files_with_extension(input_dir, "zip")?;
        let names: Vec<String> = archives.iter().map(|a| archive_name(a)).collect();
        self.classifier.check_duplicates(&names)?;

        let total = archives.len();
        println!("Found {} zip file(s)", total);

        let mut report = RepackReport::default();
        let mut asset_dirs = BTreeSet::new();
        let mut frameworks: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

        for (index, (archive, name)) in archives.iter().zip(&names).enumerate() {
            println!("[{}/{}] Found: {}", index + 1, total, name);
            let Some(classification) = self.classifier.classify(name) else {
                warn!("Skipping unknown file '{}'", name);
                println!("\tSkipping unknown file");
                report.skipped.push(name.clone());
                continue;
            };
            debug!("'{}' classified as {}", name, classification.family);

            let asset_name = classification.asset_name;
            match classification.family {
                ArtifactFamily::Library => {
                    asset_dirs.insert(self.extract_library(archive, &asset_name)?);
                }
                ArtifactFamily::Framework => {
                    let framework = self.extract_framework(archive)?;
                    frameworks
                        .entry(asset_name.clone())
                        .or_default()
                        .push(framework);
                }
                ArtifactFamily::Wheel => {
                    asset_dirs.insert(self.extract_wheel(archive, &asset_name)?);
                }
            }
            println!("\tAsset folder: {}", asset_name);
        }

        if bundle_frameworks {
            let count = frameworks.len();
            for (index, (asset_name, paths)) in frameworks.iter().enumerate() {
                println!("[{}/{}] Bundling framework: {}", index + 1, count, asset_name);
                asset_dirs.insert(self.bundle_frameworks(asset_name, paths)?);
            }
        } else if !frameworks.is_empty() {
            warn!(
                "Framework bundling disabled, {} framework asset(s) not produced",
                frameworks.len()
            );
            report.unbundled = frameworks.into_keys().collect();
        }

        report.assets = self.compress_assets(&asset_dirs)?;
        Ok(report)
    }

    /// Staging folder of `asset_name`, shared by every archive feeding that asset.
    pub(super) fn staging_dir(&self, asset_name: &str) -> Result<PathBuf> {
        let dir = self.workspace.join(asset_name);
        ensure_dir_exists(&dir)?;
        Ok(dir)
    }

    /// Private working folder of `archive`, named after its stem.
    pub(super) fn working_dir(&self, archive: &Path) -> Result<PathBuf> {
        let stem = archive
            .file_stem()
            .with_context(|| format!("Archive has no file name: {:?}", archive))?;
        let dir = self.workspace.join(stem);
        ensure_dir_exists(&dir)?;
        Ok(dir)
    }

    /// Mirrors `source` into every destination; a missing source is skipped.
    pub(super) fn sync_optional(&self, source: &Path, destinations: &[&Path]) -> Result<()> {
        if !source.exists() {
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            info!("Skipping '{}' because it is missing", source.display());
            println!("\tSkipping '{}' because it is missing", name);
            return Ok(());
        }
        for dest in destinations {
            ensure_dir_exists(dest)?;
            self.tools
                .sync(source, dest)
                .with_context(|| format!("Failed to sync {:?} into {:?}", source, dest))?;
        }
        Ok(())
    }
}

pub(super) fn archive_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
