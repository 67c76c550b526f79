//! # Repack End-to-End Tests
//!
//! File: cli/tests/repack.rs
//!
//! ## Overview
//!
//! Runs the `repack` binary against real zip archives with the system
//! `zip`, `unzip` and `rsync` tools. Tests return early (and pass) when one of
//! the tools is not installed.
//!

mod common;
use common::{repack_cmd, tools_available, write_tree, zip_entries, zip_tree};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const TOOLS: &[&str] = &["zip", "unzip", "rsync"];
const LINUX_ARCHIVE: &str = "cast_sdk_Linux.ubuntu-22.04.GNU-11.4.0.x86_64.zip";
const LINUX_ASSET: &str = "cast-12.0.0-linux.x86_64-gcc_ubuntu_22.04.zip";

/// Sandbox with `in/`, `out/` and `ws/` (workspace root) directories.
struct Release {
    sandbox: TempDir,
}

impl Release {
    fn new() -> Self {
        let sandbox = tempdir().unwrap();
        for dir in ["in", "ws", "trees"] {
            fs::create_dir_all(sandbox.path().join(dir)).unwrap();
        }
        Self { sandbox }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.sandbox.path().join(rel)
    }

    /// Zips `files` into `in/<name>`.
    fn archive(&self, name: &str, files: &[(&str, &str)]) {
        let tree = self.path("trees").join(name);
        write_tree(&tree, files);
        zip_tree(&tree, &self.path("in").join(name));
    }

    fn repack(&self, extra: &[&str]) -> assert_cmd::assert::Assert {
        repack_cmd(self.sandbox.path())
            .arg("--temp-root")
            .arg(self.path("ws"))
            .args(extra)
            .args(["cast", "v12.0.0"])
            .arg(self.path("in"))
            .arg(self.path("out"))
            .assert()
    }
}

fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_library_archive_end_to_end() {
    if !tools_available(TOOLS) {
        return;
    }
    let release = Release::new();
    release.archive(
        LINUX_ARCHIVE,
        &[
            ("include/a.h", "#pragma once\n"),
            ("lib/libcast.so", "elf"),
            ("examples/demo.c", "int main() { return 0; }\n"),
        ],
    );
    release.archive("release_notes.zip", &[("notes.txt", "hello")]);

    release
        .repack(&[])
        .success()
        .stdout(predicate::str::contains("Found 2 zip file(s)"))
        .stdout(predicate::str::contains("Skipping unknown file"))
        .stdout(predicate::str::contains(
            "Asset folder: cast-12.0.0-linux.x86_64-gcc_ubuntu_22.04",
        ))
        .stdout(predicate::str::contains("[1/1] Compressing asset"));

    let asset = release.path("out/assets").join(LINUX_ASSET);
    assert_eq!(zip_entries(&asset), vec!["a.h", "libcast.so"]);
    assert_eq!(
        fs::read_to_string(release.path("out/include/a.h")).unwrap(),
        "#pragma once\n"
    );
    assert!(release.path("out/examples/demo.c").is_file());
    assert!(release.path("out/doc").is_dir());
    // Scoped workspace is gone after the run.
    assert_eq!(entry_count(&release.path("ws")), 0);
}

#[test]
fn test_keep_temp_leaves_workspace() {
    if !tools_available(TOOLS) {
        return;
    }
    let release = Release::new();
    release.archive(LINUX_ARCHIVE, &[("lib/libcast.so", "elf")]);

    release
        .repack(&["--keep-temp"])
        .success()
        .stdout(predicate::str::contains("Workspace kept at"));

    assert_eq!(entry_count(&release.path("ws")), 1);
}

#[test]
fn test_duplicate_library_archives_abort() {
    if !tools_available(TOOLS) {
        return;
    }
    let release = Release::new();
    release.archive("cast_sdk_Darwin.23.arm64.zip", &[("lib/libcast.dylib", "a")]);
    release.archive("cast_sdk_Darwin.24.arm64.zip", &[("lib/libcast.dylib", "b")]);

    release
        .repack(&[])
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cast_sdk_Darwin.23.arm64.zip"))
        .stderr(predicate::str::contains("cast_sdk_Darwin.24.arm64.zip"));

    assert_eq!(entry_count(&release.path("out/assets")), 0);
    assert_eq!(entry_count(&release.path("ws")), 0);
}

#[test]
fn test_wheels_of_two_python_versions_make_one_asset() {
    if !tools_available(TOOLS) {
        return;
    }
    let release = Release::new();
    for python in ["311", "312"] {
        let wheel_name = format!("pyclariuscast-12.0.0-cp{}-linux_x86_64.whl", python);
        let wheel_tree = release.path("trees").join(&wheel_name);
        write_tree(
            &wheel_tree,
            &[
                ("pyclariuscast/lib/pyclariuscast.so", python),
                ("pyclariuscast/__init__.py", ""),
            ],
        );
        let outer_tree = release.path("trees").join(format!("outer{}", python));
        fs::create_dir_all(&outer_tree).unwrap();
        zip_tree(&wheel_tree, &outer_tree.join(&wheel_name));
        zip_tree(
            &outer_tree,
            &release.path("in").join(format!(
                "pyclariuscast{}-wheel_Linux.ubuntu-22.04.GNU-11.4.0.x86_64.zip",
                python
            )),
        );
    }

    release.repack(&[]).success();

    let asset = release.path("out/assets").join(LINUX_ASSET);
    assert_eq!(
        zip_entries(&asset),
        vec![
            "python311/",
            "python311/pyclariuscast.so",
            "python312/",
            "python312/pyclariuscast.so",
        ]
    );
}
