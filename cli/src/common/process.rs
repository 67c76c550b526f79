//! # Repack Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Thin wrapper around `std::process::Command` for the external tools the
//! repacker delegates to. A `CommandLine` is a plain value (program, arguments,
//! working directory) so the command builders in `common::tools` can be tested
//! without spawning anything.
//!
//! Running a command blocks until it exits. Standard output is discarded,
//! standard error is captured and attached to the error when the exit status is
//! non-zero. There are no retries and no timeouts.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::CommandLine;
//!
//! CommandLine::new("rsync")
//!     .arg("-azvh")
//!     .arg("include/")
//!     .arg("/out/include")
//!     .run()?;
//! ```
//!
use crate::core::error::{RepackError, Result};
use anyhow::Context;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Runs the command to completion.
    ///
    /// # Errors
    ///
    /// - The program cannot be spawned (not found, not executable).
    /// - `RepackError::ExternalCommand` when the exit status is non-zero.
    pub fn run(&self) -> Result<()> {
        debug!("Running: {}", self);
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .with_context(|| format!("Failed to execute '{}'", self.program))?;

        if !output.status.success() {
            anyhow::bail!(RepackError::ExternalCommand {
                cmd: self.to_string(),
                status: output.status.to_string(),
                output: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        if let Some(dir) = &self.cwd {
            write!(f, " (in {})", dir.display())?;
        }
        Ok(())
    }
}
