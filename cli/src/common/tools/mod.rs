//! # Repack External Tools (`common::tools`)
//!
//! File: cli/src/common/tools/mod.rs
//!
//! ## Overview
//!
//! Every operation the repacker cannot (or must not) do in-process goes
//! through the `Toolbox` trait:
//!
//! | capability | system tool |
//! |------------|-------------|
//! | `extract`  | `unzip` |
//! | `compress` | `zip` |
//! | `sync`     | `rsync -azvh <source>/ <dest>` |
//! | `bundle_frameworks` | `xcodebuild -create-xcframework` (macOS only) |
//!
//! The extraction routines only ever see `&dyn Toolbox`, so their logic is
//! exercised in unit tests with the `recording::RecordingToolbox` double,
//! which replays fixture directories instead of spawning processes.
//!
//! `SystemToolbox::preflight` checks up front that every program needed by
//! the run resolves, so a missing `rsync` fails before any output is written.
//!
use crate::common::archive::zip;
use crate::common::process::CommandLine;
use crate::core::config::ToolsConfig;
use crate::core::error::{RepackError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(test)]
pub mod recording;

/// Capability interface over the external archive, sync and bundling tools.
pub trait Toolbox {
    /// Extracts `archive` into `dest`; `members` restricts extraction to
    /// entries matching those wildcards (everything when empty).
    fn extract(&self, archive: &Path, dest: &Path, members: &[&str]) -> Result<()>;

    /// Compresses the contents of `dir` into `archive`, preserving symbolic
    /// links. `scratch` receives the tool's temporary files.
    fn compress(&self, archive: &Path, dir: &Path, scratch: &Path) -> Result<()>;

    /// Mirrors the contents of `source` into `dest` (which already exists).
    fn sync(&self, source: &Path, dest: &Path) -> Result<()>;

    /// Merges per-architecture framework bundles into a single bundle at `output`.
    fn bundle_frameworks(&self, frameworks: &[PathBuf], output: &Path) -> Result<()>;
}

/// `Toolbox` backed by real processes.
#[derive(Debug, Clone)]
pub struct SystemToolbox {
    tools: ToolsConfig,
}

impl SystemToolbox {
    pub fn new(tools: ToolsConfig) -> Self {
        Self { tools }
    }

    /// Verifies that every program needed for this run can be resolved.
    ///
    /// `xcodebuild` is only required when frameworks are bundled.
    pub fn preflight(&self, bundle_frameworks: bool) -> Result<()> {
        let mut required = vec![&self.tools.unzip, &self.tools.zip, &self.tools.rsync];
        if bundle_frameworks {
            required.push(&self.tools.xcodebuild);
        }

        let mut missing = Vec::new();
        for program in required {
            match which::which(program) {
                Ok(path) => debug!("Resolved '{}' to {}", program, path.display()),
                Err(_) => missing.push(program.clone()),
            }
        }
        if !missing.is_empty() {
            anyhow::bail!(RepackError::MissingTools { tools: missing });
        }
        info!("All required external tools found.");
        Ok(())
    }

    fn sync_command(&self, source: &Path, dest: &Path) -> CommandLine {
        // The trailing slash makes rsync copy the folder's content, not the folder.
        let mut content = source.as_os_str().to_os_string();
        content.push("/");
        CommandLine::new(&self.tools.rsync)
            .arg("-azvh")
            .arg(content)
            .arg(dest)
    }

    fn bundle_command(&self, frameworks: &[PathBuf], output: &Path) -> CommandLine {
        let mut cmd = CommandLine::new(&self.tools.xcodebuild).arg("-create-xcframework");
        for framework in frameworks {
            cmd = cmd.arg("-framework").arg(framework);
        }
        cmd.arg("-output").arg(output)
    }
}

impl Toolbox for SystemToolbox {
    fn extract(&self, archive: &Path, dest: &Path, members: &[&str]) -> Result<()> {
        zip::extract_command(&self.tools.unzip, archive, dest, members).run()
    }

    fn compress(&self, archive: &Path, dir: &Path, scratch: &Path) -> Result<()> {
        zip::compress_command(&self.tools.zip, archive, dir, scratch).run()
    }

    fn sync(&self, source: &Path, dest: &Path) -> Result<()> {
        self.sync_command(source, dest).run()
    }

    fn bundle_frameworks(&self, frameworks: &[PathBuf], output: &Path) -> Result<()> {
        self.bundle_command(frameworks, output).run()
    }
}
