//! # Repack Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the repacker. Every
//! fatal condition of a run ends up as an `anyhow::Error`; the ones that carry
//! domain meaning are raised as a `RepackError` variant so tests (and the
//! top-level handler) can tell them apart.
//!
//! ## Architecture
//!
//! - `RepackError`: A custom error enum using `thiserror` for the failure kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error kinds cover:
//! - Release tag and version floor validation
//! - Pattern table conflicts (duplicate matches)
//! - Unexpected contents of an extracted archive
//! - External tool failures and missing tools
//! - Configuration and filesystem problems
//!
//! ## Examples
//!
//! ```rust
//! // Raise a domain error
//! anyhow::bail!(RepackError::MissingPythonVersion { archive: name.to_string() });
//!
//! // Add context to I/O errors using anyhow
//! let entries = fs::read_dir(&dir)
//!     .with_context(|| format!("Failed to list directory: {}", dir.display()))?;
//!
//! // Match on a specific kind in tests
//! assert!(matches!(
//!     err.downcast_ref::<RepackError>(),
//!     Some(RepackError::DuplicateMatch { .. })
//! ));
//! ```
//!
use thiserror::Error;

/// Custom error type for the repacker.
#[derive(Error, Debug)]
pub enum RepackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Invalid release tag '{tag}': expected vMAJOR.MINOR.PATCH")]
    InvalidTag { tag: String },

    #[error("Current version is too old (minimum: {minimum}, current: {version})")]
    VersionTooOld { version: String, minimum: String },

    #[error("Pattern '{pattern}' matched by multiple artifacts ({}), aborting to prevent overwrites", archives.join(", "))]
    DuplicateMatch {
        pattern: String,
        archives: Vec<String>,
    },

    #[error("Expected exactly one {what} in '{archive}', found {found}")]
    UnexpectedCount {
        what: &'static str,
        archive: String,
        found: usize,
    },

    #[error("Could not get python version from the wheel archive '{archive}'")]
    MissingPythonVersion { archive: String },

    #[error("Required external tools not found: {}", tools.join(", "))]
    MissingTools { tools: Vec<String> },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
