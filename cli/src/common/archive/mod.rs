//! # Repack Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Archive handling is fully delegated to external tools. This module only
//! knows how to describe those invocations; running them is the job of
//! `common::process`, and choosing when to run them is the job of
//! `common::tools::SystemToolbox`.
//!
//! - **`zip`**: command lines for `unzip` (selective extraction) and `zip`
//!   (directory-relative compression preserving symbolic links).
//!
//! ```rust
//! use crate::common::archive::zip;
//!
//! zip::extract_command("unzip", &archive, &dest, &["*.whl"]).run()?;
//! ```
//!

pub mod zip;
