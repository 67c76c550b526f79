//! # Repack Command
//!
//! File: cli/src/commands/repack/mod.rs
//!
//! ## Overview
//!
//! Turns the heterogeneous build archives of one SDK release (native
//! libraries, Android `aar` packages, Python wheels, Apple frameworks) into
//! the canonical release layout:
//!
//! ```text
//! <output>/
//! ├── assets/      one <sdk>-<version>-<platform>.zip per asset
//! ├── examples/    merged from every archive
//! ├── include/     merged from every library archive
//! └── doc/reference/android/<version>/
//! ```
//!
//! ## Architecture
//!
//! - `naming`: names derived from sdk, version and vendor
//! - `patterns`: archive name tables and the classifier
//! - `layout`: shared output folders and the per-run workspace
//! - `pipeline`: the `Repacker` driving one run
//! - `library`, `framework`, `wheel`: one extractor per archive family
//! - `bundle`, `compress`: framework bundling and final asset compression
//!
//! Nothing touches the filesystem before the tag is validated and the
//! external tools are resolved.
//!
//! ## Examples
//!
//! ```bash
//! repack cast v12.0.0 ./artifacts ./release
//! repack --bundle-frameworks --keep-temp -vv cast v12.0.0 ./artifacts ./release
//! ```
//!
use crate::common::tools::SystemToolbox;
use crate::core::config::{self, Config};
use crate::core::error::{RepackError, Result};
use crate::core::version::validate_release_tag;
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

mod bundle;
mod compress;
mod framework;
mod layout;
mod library;
mod naming;
mod patterns;
mod pipeline;
mod wheel;

use layout::{OutputLayout, Workspace};
use naming::Naming;
use patterns::{Classifier, PatternTables};
use pipeline::{RepackReport, Repacker};

/// Arguments of a repack run.
#[derive(Parser, Debug)]
pub struct RepackArgs {
    /// SDK name, e.g. `cast`.
    pub sdk: String,

    /// Release tag, e.g. `v12.0.0`.
    pub tag: String,

    /// Directory holding the build archives (`*.zip`).
    pub input_dir: PathBuf,

    /// Directory receiving the release layout.
    pub output_dir: PathBuf,

    /// Merge the Apple framework archives into xcframework assets (macOS only).
    #[arg(long)]
    pub bundle_frameworks: bool,

    /// Configuration file, used instead of the project `.repack.toml`.
    #[arg(long, env = "REPACK_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Parent directory of the temporary workspace.
    #[arg(long, value_name = "DIR")]
    pub temp_root: Option<PathBuf>,

    /// Keep the temporary workspace after the run.
    #[arg(long)]
    pub keep_temp: bool,
}

/// Runs one repack.
pub fn handle_repack(args: RepackArgs) -> Result<()> {
    let cfg = config::load_config(args.config.as_deref())?;
    let version = validate_release_tag(&args.tag, &cfg.release.min_version)?;
    validate_sdk_name(&args.sdk)?;
    info!("Repacking '{}' version {}", args.sdk, version);

    println!("Bundle frameworks? {}", args.bundle_frameworks);
    println!("Scanning dir '{}'", args.input_dir.display());
    if !args.input_dir.is_dir() {
        anyhow::bail!(RepackError::FileSystem(format!(
            "Input directory not found: {}",
            args.input_dir.display()
        )));
    }
    let input_dir = std::path::absolute(&args.input_dir)
        .with_context(|| format!("Failed to resolve input directory {:?}", args.input_dir))?;

    let tools = SystemToolbox::new(cfg.tools.clone());
    tools.preflight(args.bundle_frameworks)?;

    let layout = OutputLayout::create(&args.output_dir)?;
    let (temp_root, keep) = workspace_settings(&args, &cfg);
    let workspace = Workspace::create(&temp_root, keep)?;

    let naming = Naming::new(&args.sdk, &version, &cfg.release.vendor);
    let classifier = Classifier::new(PatternTables::standard(&naming)?);

    let repacker = Repacker::new(&tools, &classifier, &naming, &layout, workspace.path());
    let report = repacker.run(&input_dir, args.bundle_frameworks)?;
    print_summary(&report);

    if keep {
        println!("Workspace kept at {}", workspace.path().display());
    }
    Ok(())
}

/// The SDK name ends up in file names and glob patterns.
fn validate_sdk_name(sdk: &str) -> Result<()> {
    if sdk.is_empty() || sdk.contains(['/', '\\']) {
        anyhow::bail!(RepackError::Config(format!(
            "Invalid SDK name '{}': must be non-empty and contain no path separators",
            sdk
        )));
    }
    Ok(())
}

/// Workspace root and keep flag; command-line flags win over the config file.
fn workspace_settings(args: &RepackArgs, cfg: &Config) -> (PathBuf, bool) {
    let root = args
        .temp_root
        .clone()
        .or_else(|| cfg.workspace.temp_root.as_ref().map(PathBuf::from))
        .unwrap_or_else(std::env::temp_dir);
    (root, args.keep_temp || cfg.workspace.keep)
}

fn print_summary(report: &RepackReport) {
    println!("Produced {} asset(s):", report.assets.len());
    for asset in &report.assets {
        println!("\t{}", display_name(asset));
    }
    if !report.skipped.is_empty() {
        println!("Skipped {} unknown archive(s):", report.skipped.len());
        for name in &report.skipped {
            println!("\t{}", name);
        }
    }
    if !report.unbundled.is_empty() {
        println!(
            "Left {} framework asset(s) unbundled (use --bundle-frameworks):",
            report.unbundled.len()
        );
        for name in &report.unbundled {
            println!("\t{}", name);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
