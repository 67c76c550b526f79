//! # Wheel Archive Extraction
//!
//! File: cli/src/commands/repack/wheel.rs
//!
//! A wheel archive wraps exactly one `.whl` file built for one Python
//! version, which is encoded in the archive name
//! (`pyclariuscast312-wheel_...` is Python 3.12). Only the compiled module is
//! kept: the `lib/` folder of the wheel lands in `<staging>/python312`, so the
//! archives of every Python version of a platform merge into one asset.
//!
use super::pipeline::{archive_name, Repacker};
use crate::common::fs::{io::ensure_dir_exists, relocate, search};
use crate::core::error::{RepackError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

impl Repacker<'_> {
    /// Extracts the shared library of a wheel archive into the staging folder
    /// of `asset_name` and returns that folder.
    pub(super) fn extract_wheel(&self, archive: &Path, asset_name: &str) -> Result<PathBuf> {
        let name = archive_name(archive);
        let python = self
            .naming
            .python_version(&name)
            .ok_or_else(|| RepackError::MissingPythonVersion {
                archive: name.clone(),
            })?;

        let asset_dir = self.staging_dir(asset_name)?;
        let artifact_dir = self.working_dir(archive)?;
        self.tools.extract(archive, &artifact_dir, &["*.whl"])?;
        let wheel = single_match(&artifact_dir, "*.whl", "wheel file", &name)?;

        let wheel_dir = artifact_dir.join("wheel");
        ensure_dir_exists(&wheel_dir)?;
        let library_pattern = self.naming.wheel_library_pattern();
        self.tools
            .extract(&wheel, &wheel_dir, &[library_pattern.as_str()])?;
        let library = single_match(&wheel_dir, &library_pattern, "shared library file", &name)?;

        let lib_dir = library
            .parent()
            .with_context(|| format!("Shared library has no parent folder: {:?}", library))?;
        let target = asset_dir.join(format!("python{}", python));
        relocate::move_to(lib_dir, &target)?;
        debug!("Python {} module of '{}' staged in {:?}", python, name, target);
        Ok(asset_dir)
    }
}

fn single_match(base: &Path, pattern: &str, what: &'static str, archive: &str) -> Result<PathBuf> {
    let mut matches = search::find_matches(base, pattern)?;
    if matches.len() != 1 {
        anyhow::bail!(RepackError::UnexpectedCount {
            what,
            archive: archive.to_string(),
            found: matches.len(),
        });
    }
    Ok(matches.remove(0))
}

#[cfg(test)]
mod tests {
    use super::super::layout::OutputLayout;
    use super::super::naming::Naming;
    use super::super::patterns::{Classifier, PatternTables};
    use super::*;
    use crate::common::tools::recording::RecordingToolbox;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const ASSET: &str = "cast-12.0.0-linux.x86_64-gcc_ubuntu_22.04";

    struct Setup {
        root: TempDir,
        naming: Naming,
        classifier: Classifier,
        layout: OutputLayout,
        workspace: PathBuf,
    }

    impl Setup {
        fn new() -> Self {
            let root = tempdir().unwrap();
            let naming = Naming::new("cast", "12.0.0", "clarius");
            let classifier = Classifier::new(PatternTables::standard(&naming).unwrap());
            let layout = OutputLayout::create(&root.path().join("out")).unwrap();
            let workspace = root.path().join("ws");
            fs::create_dir_all(&workspace).unwrap();
            Self {
                root,
                naming,
                classifier,
                layout,
                workspace,
            }
        }

        fn tree(&self, name: &str, files: &[&str]) -> PathBuf {
            let tree = self.root.path().join("fixtures").join(name);
            fs::create_dir_all(&tree).unwrap();
            for file in files {
                let path = tree.join(file);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, *file).unwrap();
            }
            tree
        }

        /// Registers an outer archive holding `wheels`, each expanding to `libs`.
        fn wheel_archive(
            &self,
            tools: RecordingToolbox,
            archive: &str,
            wheels: &[&str],
            libs: &[&str],
        ) -> RecordingToolbox {
            let outer = self.tree(archive, wheels);
            let mut tools = tools.with_archive(archive, &outer);
            for wheel in wheels {
                let inner = self.tree(&format!("{}-{}", archive, wheel), libs);
                tools = tools.with_archive(wheel, &inner);
            }
            tools
        }

        fn extract(&self, tools: &RecordingToolbox, archive: &str) -> Result<PathBuf> {
            let repacker = Repacker::new(
                tools,
                &self.classifier,
                &self.naming,
                &self.layout,
                &self.workspace,
            );
            repacker.extract_wheel(&self.root.path().join(archive), ASSET)
        }
    }

    fn expect_count(result: Result<PathBuf>, what: &str, expected: usize) {
        match result.unwrap_err().downcast_ref::<RepackError>() {
            Some(RepackError::UnexpectedCount { what: w, found, .. }) => {
                assert_eq!(*w, what);
                assert_eq!(*found, expected);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_two_python_versions_share_one_asset() -> Result<()> {
        let setup = Setup::new();
        let a = "pyclariuscast311-wheel_Linux.ubuntu-22.04.GNU-11.4.0.x86_64.zip";
        let b = "pyclariuscast312-wheel_Linux.ubuntu-22.04.GNU-11.4.0.x86_64.zip";
        let tools = setup.wheel_archive(
            RecordingToolbox::new(),
            a,
            &["pyclariuscast-12.0.0-cp311-linux_x86_64.whl"],
            &["pyclariuscast/lib/pyclariuscast.so"],
        );
        let tools = setup.wheel_archive(
            tools,
            b,
            &["pyclariuscast-12.0.0-cp312-linux_x86_64.whl"],
            &["pyclariuscast/lib/pyclariuscast.so"],
        );

        let first = setup.extract(&tools, a)?;
        let second = setup.extract(&tools, b)?;

        assert_eq!(first, second);
        assert!(first.join("python311/pyclariuscast.so").is_file());
        assert!(first.join("python312/pyclariuscast.so").is_file());
        Ok(())
    }

    #[test]
    fn test_same_python_version_twice_is_fatal() -> Result<()> {
        let setup = Setup::new();
        let a = "pyclariuscast312-wheel_Linux.ubuntu-22.04.GNU-11.4.0.x86_64.zip";
        let b = "pyclariuscast312-wheel_Linux.ubuntu-22.04.GNU-11.4.0.x86_64_rebuild.zip";
        let tools = setup.wheel_archive(
            RecordingToolbox::new(),
            a,
            &["first.whl"],
            &["pyclariuscast/lib/pyclariuscast.so"],
        );
        let tools = setup.wheel_archive(
            tools,
            b,
            &["second.whl"],
            &["pyclariuscast/lib/pyclariuscast.so"],
        );

        setup.extract(&tools, a)?;
        let err = setup.extract(&tools, b).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepackError>(),
            Some(RepackError::FileSystem(_))
        ));
        Ok(())
    }

    #[test]
    fn test_missing_python_version() {
        let setup = Setup::new();
        let tools = RecordingToolbox::new();
        let err = setup
            .extract(&tools, "pyclariuscast-wheel_Windows.10.AMD64.zip")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RepackError>(),
            Some(RepackError::MissingPythonVersion { .. })
        ));
        assert_eq!(tools.extract_count(), 0);
    }

    #[test]
    fn test_wheel_count_must_be_one() {
        let setup = Setup::new();
        let archive = "pyclariuscast312-wheel_Windows.10.AMD64.zip";
        let tools = setup.wheel_archive(
            RecordingToolbox::new(),
            archive,
            &["a.whl", "b.whl"],
            &["pyclariuscast/lib/pyclariuscast.pyd"],
        );
        expect_count(setup.extract(&tools, archive), "wheel file", 2);
    }

    #[test]
    fn test_library_count_must_be_one() {
        let setup = Setup::new();
        let archive = "pyclariuscast312-wheel_Windows.10.AMD64.zip";
        let tools = setup.wheel_archive(
            RecordingToolbox::new(),
            archive,
            &["a.whl"],
            &["pyclariuscast/__init__.py"],
        );
        expect_count(setup.extract(&tools, archive), "shared library file", 0);
    }
}
