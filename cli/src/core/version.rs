//! # Release Version Validation
//!
//! File: cli/src/core/version.rs
//!
//! ## Overview
//!
//! Turns a release tag (`v11.3.3`) into the plain version string embedded in
//! asset names (`11.3.3`) and enforces the minimum supported release.
//!
//! The floor is compared numerically on `MAJOR.MINOR.PATCH` using `semver`,
//! so `v100.0.0` is accepted and `v2.0.0` is rejected against `11.3.3`.
//! Pre-release and build suffixes are kept in the returned string but ignored
//! by the comparison (`11.3.3-rc1` passes a `11.3.3` floor).
//!
//! Validation only inspects strings; it never touches the filesystem.
//!
use crate::core::error::{RepackError, Result};
use semver::Version;
use tracing::debug;

/// Strips the leading `v` from a release tag.
///
/// Tags without the prefix are returned unchanged.
pub fn normalize_tag(tag: &str) -> &str {
    let trimmed = tag.trim();
    match trimmed.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => trimmed,
    }
}

/// Normalizes `tag` and checks it against `minimum`.
///
/// # Returns
///
/// * `Result<String>` - The version without the `v` prefix.
///
/// # Errors
///
/// - `RepackError::InvalidTag` if the tag is not `[v]MAJOR.MINOR.PATCH[-pre][+build]`.
/// - `RepackError::VersionTooOld` if the version is below the floor.
/// - `RepackError::Config` if `minimum` itself is not a valid version.
pub fn validate_release_tag(tag: &str, minimum: &str) -> Result<String> {
    let version = normalize_tag(tag);
    let parsed = Version::parse(version).map_err(|_| RepackError::InvalidTag {
        tag: tag.to_string(),
    })?;
    let floor = parse_floor(minimum)?;

    let core = Version::new(parsed.major, parsed.minor, parsed.patch);
    debug!("Comparing release {} against floor {}", core, floor);
    if core < floor {
        anyhow::bail!(RepackError::VersionTooOld {
            version: version.to_string(),
            minimum: minimum.to_string(),
        });
    }
    Ok(version.to_string())
}

/// Parses the configured minimum version.
pub fn parse_floor(minimum: &str) -> Result<Version> {
    Version::parse(normalize_tag(minimum)).map_err(|e| {
        RepackError::Config(format!("Invalid minimum version '{}': {}", minimum, e)).into()
    })
}
