//! # Repack Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the command logic reachable from the entry point (`main.rs`).
//! The CLI has a single command, `repack`, which defines its own arguments
//! structure (`RepackArgs`) and handler (`handle_repack`). Its building blocks
//! (classifier, extractors, compressor) are declared inside
//! `commands/repack/mod.rs`, not here.
//!

/// Repacking the build archives of an SDK release into release assets.
pub mod repack;
