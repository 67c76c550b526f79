//! # Repack Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the extraction routines.
//!
//! - **`io`**: directory creation, stale file removal, archive listing.
//! - **`search`**: glob and recursive file-name lookups inside extracted archives.
//! - **`relocate`**: moving binaries and library folders into staging folders.
//!
//! Callers import from the specific submodule, e.g.
//! `use crate::common::fs::io::ensure_dir_exists;`.
//!

/// Directory creation, file removal and listing (e.g., `ensure_dir_exists`).
pub mod io;
/// Moving files and directories (e.g., `move_into`).
pub mod relocate;
/// Finding extracted files by glob or by file name (e.g., `find_matches`).
pub mod search;
