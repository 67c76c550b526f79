//! # Repack Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utility modules used by the repack command. They keep the
//! command logic (`commands::`) free of process spawning and filesystem
//! plumbing, and separate from core infrastructure (`core::`).
//!
//! ## Architecture
//!
//! - **`archive`**: Command lines for the external `unzip` / `zip` tools.
//! - **`fs`**: Directory creation, searching extracted trees, moving files into staging folders.
//! - **`process`**: Running an external command and turning a non-zero exit into an error.
//! - **`tools`**: The `Toolbox` capability trait and its process-backed implementation.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//! use crate::common::tools::{SystemToolbox, Toolbox};
//!
//! io::ensure_dir_exists(&assets_dir)?;
//! let toolbox = SystemToolbox::new(config.tools.clone());
//! toolbox.extract(&archive, &work_dir, &[])?;
//! ```
//!

/// Command lines for archive extraction and compression.
pub mod archive;
/// Filesystem helpers (I/O, search, relocation).
pub mod fs;
/// Executing external processes.
pub mod process;
/// The `Toolbox` trait over external tools.
pub mod tools;
