//! # Release Naming
//!
//! File: cli/src/commands/repack/naming.rs
//!
//! Every name the repacker derives from the SDK name, the release version and
//! the vendor: asset names, the wheel prefix, framework bundle names and the
//! Android documentation destination.
//!
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    pub sdk: String,
    pub version: String,
    pub vendor: String,
}

impl Naming {
    pub fn new(sdk: &str, version: &str, vendor: &str) -> Self {
        Self {
            sdk: sdk.to_string(),
            version: version.to_string(),
            vendor: vendor.to_string(),
        }
    }

    /// `<sdk>-<version>-<platform>`, e.g. `cast-12.0.0-macos.arm64`.
    pub fn asset(&self, platform: &str) -> String {
        format!("{}-{}-{}", self.sdk, self.version, platform)
    }

    /// Prefix of the Python wheel artifacts, e.g. `pyclariuscast`.
    pub fn wheel_prefix(&self) -> String {
        format!("py{}{}", self.vendor, self.sdk)
    }

    /// Location of the shared library inside a wheel.
    pub fn wheel_library_pattern(&self) -> String {
        format!("py{}*/lib/*", self.vendor)
    }

    /// Per-architecture framework bundle shipped by the framework builders.
    pub fn framework_dir_name(&self) -> String {
        format!("{}_framework.framework", self.sdk)
    }

    /// Multi-platform bundle produced by the framework bundler.
    pub fn xcframework_name(&self) -> String {
        format!("{}_{}.xcframework", self.vendor, self.sdk)
    }

    /// Android API docs destination, relative to the documentation folder.
    pub fn android_doc_dir(&self) -> PathBuf {
        PathBuf::from("reference").join("android").join(&self.version)
    }

    /// Python version encoded in a wheel archive name.
    ///
    /// `pyclariuscast312-wheel_Linux...zip` gives `Some("312")`; names that do
    /// not start with `<prefix><digits>-wheel` give `None`.
    pub fn python_version(&self, archive_name: &str) -> Option<String> {
        let rest = archive_name.strip_prefix(&self.wheel_prefix())?;
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() || !rest[digits.len()..].starts_with("-wheel") {
            return None;
        }
        Some(digits)
    }
}
