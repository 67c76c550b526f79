//! # Repack CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`main_tests.rs`,
//! `repack.rs`). Each `.rs` file in `cli/tests/` (that isn't a module like
//! this one) is compiled as a separate test crate run against the `repack`
//! binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Creates an `assert_cmd::Command` for the compiled `repack` binary.
///
/// The user configuration directory is redirected into `sandbox` so a
/// developer's own `config.toml` cannot leak into the run, and the explicit
/// configuration file `sandbox/repack.toml` (empty unless written by the test)
/// replaces any project `.repack.toml`.
///
/// ## Panics
/// Panics if the `repack` binary cannot be found via `Command::cargo_bin`.
pub fn repack_cmd(sandbox: &Path) -> Command {
    let config_file = sandbox.join("repack.toml");
    if !config_file.exists() {
        fs::write(&config_file, "").expect("Failed to write test config");
    }
    let mut cmd = Command::cargo_bin("repack").expect("Failed to find repack binary for testing");
    cmd.env("HOME", sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join(".config"))
        .env("REPACK_CONFIG", &config_file)
        .env_remove("RUST_LOG");
    cmd
}

/// Whether every program in `tools` resolves on `PATH`.
pub fn tools_available(tools: &[&str]) -> bool {
    let missing: Vec<&str> = tools
        .iter()
        .copied()
        .filter(|tool| which::which(tool).is_err())
        .collect();
    if !missing.is_empty() {
        eprintln!("Skipping test, tools not found: {}", missing.join(", "));
    }
    missing.is_empty()
}

/// Writes `files` (relative path, content) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let file = root.join(path);
        fs::create_dir_all(file.parent().expect("relative path has a parent"))
            .expect("Failed to create fixture directory");
        fs::write(file, content).expect("Failed to write fixture file");
    }
}

/// Zips the content of `tree` into `archive` with the system `zip` tool.
pub fn zip_tree(tree: &Path, archive: &Path) -> PathBuf {
    let status = std::process::Command::new("zip")
        .arg("-q")
        .arg("-r")
        .arg(archive)
        .arg(".")
        .current_dir(tree)
        .status()
        .expect("Failed to run zip");
    assert!(status.success(), "zip failed for {:?}", tree);
    archive.to_path_buf()
}

/// Entry names of `archive`, sorted, as listed by `unzip -Z1`.
pub fn zip_entries(archive: &Path) -> Vec<String> {
    let output = std::process::Command::new("unzip")
        .arg("-Z1")
        .arg(archive)
        .output()
        .expect("Failed to run unzip");
    assert!(output.status.success(), "unzip -Z1 failed for {:?}", archive);
    let mut entries: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    entries.sort();
    entries
}
