//! # Repack Zip Command Lines (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//!
//! ## Overview
//!
//! Builds the `unzip` and `zip` invocations. The command-line tools are used
//! instead of an in-process zip implementation because the SDK archives carry
//! symbolic links (versioned shared objects, framework `Versions/Current`)
//! that have to survive both extraction and re-compression.
//!
//! - Extraction: `unzip <archive> [members...] -d <dest>`. Members are
//!   `unzip` wildcards (`*.whl`, `pyclarius*/lib/*`).
//! - Compression: `zip <archive> --temp-path <tmp> --symlinks -r .`, run from
//!   inside the folder so archive paths do not include the folder's own name.
//!
use crate::common::process::CommandLine;
use std::path::Path;

/// `unzip` invocation extracting `members` (all when empty) of `archive` into `dest`.
pub fn extract_command(program: &str, archive: &Path, dest: &Path, members: &[&str]) -> CommandLine {
    CommandLine::new(program)
        .arg(archive)
        .args(members)
        .arg("-d")
        .arg(dest)
}

/// `zip` invocation compressing the contents of `dir` into `archive`.
///
/// `archive` must be absolute since the command runs with `dir` as working directory.
pub fn compress_command(program: &str, archive: &Path, dir: &Path, scratch: &Path) -> CommandLine {
    CommandLine::new(program)
        .arg(archive)
        .arg("--temp-path")
        .arg(scratch)
        .args(["--symlinks", "-r", "."])
        .current_dir(dir)
}
