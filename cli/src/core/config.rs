//! # Repack Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the configuration of the repacker.
//! Every setting has a built-in default, so running without any file behaves
//! exactly like the CI pipeline expects.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (or `REPACK_CONFIG`)
//! 2. Project-specific `.repack.toml` in current directory or ancestors
//! 3. User-specific `<config dir>/repack/config.toml`
//! 4. Default values defined in the code
//!
//! After merging, paths are `~`-expanded and the result is validated.
//!
//! ## Examples
//!
//! ```toml
//! [release]
//! min_version = "11.3.3"
//! vendor = "clarius"
//!
//! [tools]
//! rsync = "/usr/local/bin/rsync"
//!
//! [workspace]
//! temp_root = "~/tmp"
//! keep = true
//! ```
//!
use crate::core::error::{RepackError, Result};
use crate::core::version;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

/// Release naming settings.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Oldest release version the repacker accepts.
    #[serde(default = "default_min_version")]
    pub min_version: String,
    /// Vendor prefix used in wheel names (`py<vendor><sdk>`) and in the
    /// combined framework bundle (`<vendor>_<sdk>.xcframework`).
    #[serde(default = "default_vendor")]
    pub vendor: String,
}

/// Names or paths of the external programs.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    #[serde(default = "default_unzip")]
    pub unzip: String,
    #[serde(default = "default_zip")]
    pub zip: String,
    #[serde(default = "default_rsync")]
    pub rsync: String,
    #[serde(default = "default_xcodebuild")]
    pub xcodebuild: String,
}

/// Where staging and working folders live.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Parent of the run workspace (can use ~). Defaults to the system temp dir.
    pub temp_root: Option<String>,
    /// Keep the workspace after the run instead of removing it.
    #[serde(default)]
    pub keep: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            min_version: default_min_version(),
            vendor: default_vendor(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            unzip: default_unzip(),
            zip: default_zip(),
            rsync: default_rsync(),
            xcodebuild: default_xcodebuild(),
        }
    }
}

fn default_min_version() -> String {
    "11.3.3".to_string()
}
fn default_vendor() -> String {
    "clarius".to_string()
}
fn default_unzip() -> String {
    "unzip".to_string()
}
fn default_zip() -> String {
    "zip".to_string()
}
fn default_rsync() -> String {
    "rsync".to_string()
}
fn default_xcodebuild() -> String {
    "xcodebuild".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".repack.toml";

/// Loads the merged configuration.
///
/// `explicit` replaces the project file search when given.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => load_project_config()?,
    };
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Repack", "repack") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.repack.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` up to the filesystem root, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win whenever they differ from the built-in default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let pick = |project: String, user: String, default: String| {
        if project != default {
            project
        } else {
            user
        }
    };

    let mut merged = Config::default();
    merged.release.min_version = pick(
        project_cfg.release.min_version,
        user.release.min_version,
        default_min_version(),
    );
    merged.release.vendor = pick(
        project_cfg.release.vendor,
        user.release.vendor,
        default_vendor(),
    );
    merged.tools.unzip = pick(project_cfg.tools.unzip, user.tools.unzip, default_unzip());
    merged.tools.zip = pick(project_cfg.tools.zip, user.tools.zip, default_zip());
    merged.tools.rsync = pick(project_cfg.tools.rsync, user.tools.rsync, default_rsync());
    merged.tools.xcodebuild = pick(
        project_cfg.tools.xcodebuild,
        user.tools.xcodebuild,
        default_xcodebuild(),
    );
    merged.workspace.temp_root = project_cfg
        .workspace
        .temp_root
        .or(user.workspace.temp_root);
    merged.workspace.keep = project_cfg.workspace.keep || user.workspace.keep;
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(root) = &config.workspace.temp_root {
        let expanded = shellexpand::tilde(root).into_owned();
        debug!("Expanded workspace temp root: {}", expanded);
        config.workspace.temp_root = Some(expanded);
    }
    for tool in [
        &mut config.tools.unzip,
        &mut config.tools.zip,
        &mut config.tools.rsync,
        &mut config.tools.xcodebuild,
    ] {
        *tool = shellexpand::tilde(tool.as_str()).into_owned();
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    version::parse_floor(&config.release.min_version)?;

    let vendor = &config.release.vendor;
    if vendor.is_empty() || !vendor.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(anyhow!(RepackError::Config(format!(
            "Vendor '{}' must be a non-empty alphanumeric identifier.",
            vendor
        ))));
    }

    for (name, program) in [
        ("unzip", &config.tools.unzip),
        ("zip", &config.tools.zip),
        ("rsync", &config.tools.rsync),
        ("xcodebuild", &config.tools.xcodebuild),
    ] {
        if program.trim().is_empty() {
            return Err(anyhow!(RepackError::Config(format!(
                "Tool '{}' cannot be configured with an empty program.",
                name
            ))));
        }
    }

    if let Some(root) = &config.workspace.temp_root {
        let root = Path::new(root);
        if root.exists() && !root.is_dir() {
            return Err(anyhow!(RepackError::Config(format!(
                "Configured temp root '{}' exists but is not a directory.",
                root.display()
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}
