//! # Repack Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components used by the
//! repack command: configuration, error management and release version
//! validation.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//! - `version`: Release tag normalization and the minimum version floor
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{RepackError, Result}; // For error handling
//! use crate::core::version; // For validating the release tag
//! ```
//!
pub mod config;
pub mod error;
pub mod version;
