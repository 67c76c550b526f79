//! # Artifact Pattern Tables and Classifier
//!
//! File: cli/src/commands/repack/patterns.rs
//!
//! ## Overview
//!
//! Builders name their zip files after the platform, architecture and
//! toolchain they ran on (`cast_sdk_Linux.ubuntu-22.04.GNU-11.4.0.x86_64.zip`).
//! This module maps those names to canonical release asset names
//! (`cast-12.0.0-linux.x86_64-gcc_ubuntu_22.04`).
//!
//! ## Architecture
//!
//! - `PatternTable`: ordered `(glob, asset name)` pairs; first match wins.
//! - `PatternTables`: the three archive tables (library, framework, wheel)
//!   plus the flat binary file patterns used inside library archives.
//!   `PatternTables::standard` builds the tables for one release from a
//!   `Naming`; tests can build synthetic ones.
//! - `Classifier`: owns the tables, classifies archive names into an
//!   `ArtifactFamily` and guards against one library pattern matching several
//!   archives.
//!
//! Matching is shell-style (`fnmatch`): case-sensitive, `*` matches any run of
//! characters and `?` a single one. The SDK name and vendor are escaped before
//! being embedded into patterns.
//!
use super::naming::Naming;
use crate::core::error::{RepackError, Result};
use anyhow::Context;
use glob::Pattern;
use std::fmt;
use tracing::debug;

/// Ubuntu releases with Linux builders.
const UBUNTU_RELEASES: [&str; 4] = ["20.04", "22.04", "23.10", "24.04"];
/// Linux builder architectures.
const LINUX_ARCHS: [&str; 2] = ["x86_64", "aarch64"];

/// The closed set of archive kinds the repacker knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFamily {
    /// Native SDK archive (headers, examples, libraries, optional Android docs).
    Library,
    /// Apple framework archive (one `.framework` bundle per archive).
    Framework,
    /// Python wheel archive (one wheel for one Python version).
    Wheel,
}

impl fmt::Display for ArtifactFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactFamily::Library => "library",
            ArtifactFamily::Framework => "framework",
            ArtifactFamily::Wheel => "wheel",
        };
        f.write_str(name)
    }
}

/// Result of classifying an archive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub family: ArtifactFamily,
    pub asset_name: String,
}

/// Ordered mapping from glob pattern to asset name.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    entries: Vec<(Pattern, String)>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pattern; an invalid glob is a configuration error.
    pub fn insert(&mut self, pattern: &str, asset_name: impl Into<String>) -> Result<()> {
        let compiled = Pattern::new(pattern).map_err(|e| {
            RepackError::Config(format!("Invalid artifact pattern '{}': {}", pattern, e))
        })?;
        self.entries.push((compiled, asset_name.into()));
        Ok(())
    }

    /// Asset name of the first pattern matching `file_name`.
    pub fn find(&self, file_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(pattern, _)| pattern.matches(file_name))
            .map(|(_, asset)| asset.as_str())
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.entries.iter().map(|(pattern, _)| pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// All pattern tables of one release.
#[derive(Debug, Clone, Default)]
pub struct PatternTables {
    pub libraries: PatternTable,
    pub frameworks: PatternTable,
    pub wheels: PatternTable,
    /// File names of binaries moved out of library archives.
    pub binaries: Vec<Pattern>,
}

impl PatternTables {
    /// The tables used for the SDK releases.
    pub fn standard(naming: &Naming) -> Result<Self> {
        let sdk = Pattern::escape(&naming.sdk);
        let wheel = Pattern::escape(&naming.wheel_prefix());
        let mut tables = Self::default();

        let libraries = &mut tables.libraries;
        for (arch, abi) in [
            ("aarch64", "arm64-v8a"),
            ("armv7-a", "armeabi-v7a"),
            ("i686", "x86"),
            ("x86_64", "x86_64"),
        ] {
            libraries.insert(
                &format!("{sdk}_sdk_aar_Android.*.{arch}*"),
                naming.asset(&format!("aar-android.{abi}")),
            )?;
        }
        for (arch, abi) in [
            ("aarch64", "arm64-v8a"),
            ("armv7-a", "armeabi-v7a"),
            ("i686", "x86"),
            ("x86_64", "x86_64"),
        ] {
            libraries.insert(
                &format!("{sdk}_sdk_Android.*.{arch}*"),
                naming.asset(&format!("android.{abi}")),
            )?;
        }
        libraries.insert(&format!("{sdk}_sdk_Darwin.*.arm64*"), naming.asset("macos.arm64"))?;
        libraries.insert(&format!("{sdk}_sdk_Darwin.*.x86_64*"), naming.asset("macos.x86_64"))?;
        libraries.insert(&format!("{sdk}_sdk_Windows.*.AMD64*"), naming.asset("windows.x86_64"))?;
        libraries.insert(&format!("{sdk}_sdk_Windows.*MSVC*"), naming.asset("windows.x86_64"))?;
        for arch in LINUX_ARCHS {
            for ubuntu in UBUNTU_RELEASES {
                libraries.insert(
                    &format!("{sdk}_sdk_Linux.ubuntu-{ubuntu}.GNU-*.{arch}*"),
                    naming.asset(&format!("linux.{arch}-gcc_ubuntu_{ubuntu}")),
                )?;
            }
        }

        // Several builders feed the same asset; the bundler merges them.
        let frameworks = &mut tables.frameworks;
        frameworks.insert(
            &format!("{sdk}_sdk_framework_iOS.*.arm64_*"),
            naming.asset("framework-arm64"),
        )?;
        frameworks.insert(
            &format!("{sdk}_sdk_framework_iphonesimulator.iOS.*.arm64_*"),
            naming.asset("framework-arm64"),
        )?;
        frameworks.insert(
            &format!("{sdk}_sdk_framework_Darwin.*.arm64_*"),
            naming.asset("framework-arm64"),
        )?;
        frameworks.insert(
            &format!("{sdk}_sdk_framework_Darwin.*.x86_64_*"),
            naming.asset("framework-x86_64"),
        )?;

        let wheels = &mut tables.wheels;
        wheels.insert(&format!("{wheel}*-wheel_Darwin.*.arm64*"), naming.asset("macos.arm64"))?;
        wheels.insert(&format!("{wheel}*-wheel_Darwin.*.x86_64*"), naming.asset("macos.x86_64"))?;
        for arch in LINUX_ARCHS {
            for ubuntu in UBUNTU_RELEASES {
                wheels.insert(
                    &format!("{wheel}*-wheel_Linux.ubuntu-{ubuntu}.GNU-*.{arch}*"),
                    naming.asset(&format!("linux.{arch}-gcc_ubuntu_{ubuntu}")),
                )?;
            }
        }
        wheels.insert(&format!("{wheel}*-wheel_Windows.*.AMD64*"), naming.asset("windows.x86_64"))?;
        wheels.insert(&format!("{wheel}*-wheel_Windows.*MSVC*"), naming.asset("windows.x86_64"))?;

        for binary in [
            format!("{sdk}-*.aar"),
            format!("lib{sdk}.*"),
            format!("{sdk}.lib"),
            format!("{sdk}.dll"),
        ] {
            tables.binaries.push(
                Pattern::new(&binary)
                    .with_context(|| format!("Invalid binary pattern '{}'", binary))?,
            );
        }

        debug!(
            "Built pattern tables: {} library, {} framework, {} wheel, {} binary patterns",
            tables.libraries.len(),
            tables.frameworks.len(),
            tables.wheels.len(),
            tables.binaries.len()
        );
        Ok(tables)
    }
}

/// Classifies archive names against a set of pattern tables.
#[derive(Debug, Clone)]
pub struct Classifier {
    tables: PatternTables,
}

impl Classifier {
    pub fn new(tables: PatternTables) -> Self {
        Self { tables }
    }

    /// First matching family, checked in order library, framework, wheel.
    pub fn classify(&self, file_name: &str) -> Option<Classification> {
        let families = [
            (ArtifactFamily::Library, &self.tables.libraries),
            (ArtifactFamily::Framework, &self.tables.frameworks),
            (ArtifactFamily::Wheel, &self.tables.wheels),
        ];
        families.into_iter().find_map(|(family, table)| {
            table.find(file_name).map(|asset| Classification {
                family,
                asset_name: asset.to_string(),
            })
        })
    }

    /// Fails if any library pattern matches more than one of `file_names`.
    ///
    /// Two archives matching the same pattern would be extracted into the
    /// same staging folder and one would silently overwrite the other.
    pub fn check_duplicates(&self, file_names: &[String]) -> Result<()> {
        for pattern in self.tables.libraries.patterns() {
            let matched: Vec<String> = file_names
                .iter()
                .filter(|name| pattern.matches(name))
                .cloned()
                .collect();
            if matched.len() > 1 {
                anyhow::bail!(RepackError::DuplicateMatch {
                    pattern: pattern.as_str().to_string(),
                    archives: matched,
                });
            }
        }
        Ok(())
    }

    pub fn binary_patterns(&self) -> &[Pattern] {
        &self.tables.binaries
    }
}
