//! Artifact extraction.
//!
//! The build system hands over a `.zip`-named archive that is really a tar
//! wrapper around a single `.tar` payload. Extraction is two-step: unpack
//! the wrapper in the staging root to obtain the intermediate tar, then
//! unpack the intermediate into a freshly recreated working directory and
//! delete the intermediate.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::layout::SuiteLayout;
use crate::process::Cmd;

/// Suffix the build artifact is required to carry.
pub const ARTIFACT_SUFFIX: &str = ".zip";

/// Suffix of the intermediate archive inside the wrapper.
pub const INTERMEDIATE_SUFFIX: &str = ".tar";

/// Derive the intermediate tar name from the artifact name.
///
/// Substitutes the `.zip` suffix with `.tar`; rejects artifacts without
/// the expected suffix up front rather than guessing.
pub fn intermediate_tar_name(artifact: &Path) -> Result<String> {
    let name = artifact
        .file_name()
        .and_then(|part| part.to_str())
        .with_context(|| format!("artifact path '{}' has no usable name", artifact.display()))?;

    let Some(stem) = name.strip_suffix(ARTIFACT_SUFFIX) else {
        bail!(
            "artifact '{}' does not end in '{}'; refusing to guess the intermediate archive name",
            name,
            ARTIFACT_SUFFIX
        );
    };

    Ok(format!("{stem}{INTERMEDIATE_SUFFIX}"))
}

/// Remove any previous working directory and recreate it empty.
///
/// Guarantees a prior run's contents never leak into the new signing
/// manifest.
pub fn recreate_work_dir(layout: &SuiteLayout) -> Result<()> {
    let work_dir = &layout.work_dir;
    if work_dir.exists() {
        fs::remove_dir_all(work_dir).with_context(|| {
            format!(
                "removing previous working directory '{}'",
                work_dir.display()
            )
        })?;
    }
    fs::create_dir_all(work_dir)
        .with_context(|| format!("creating working directory '{}'", work_dir.display()))?;
    Ok(())
}

/// Unpack the artifact into the layout's working directory.
///
/// The artifact path must be absolute (the wrapper is extracted with the
/// staging root as working directory). Returns the path of the deleted
/// intermediate for diagnostics.
pub fn extract_artifact(artifact: &Path, layout: &SuiteLayout) -> Result<PathBuf> {
    let tar_path = layout.staging.join(intermediate_tar_name(artifact)?);

    Cmd::new("tar")
        .arg("-xf")
        .arg_path(artifact)
        .current_dir(&layout.staging)
        .error_msg(format!("unpacking artifact '{}'", artifact.display()))
        .run()?;

    if !tar_path.is_file() {
        bail!(
            "artifact '{}' did not contain the expected intermediate archive '{}'",
            artifact.display(),
            tar_path.display()
        );
    }

    recreate_work_dir(layout)?;

    Cmd::new("tar")
        .arg("-xf")
        .arg_path(&tar_path)
        .arg("-C")
        .arg_path(&layout.work_dir)
        .error_msg(format!(
            "unpacking intermediate archive '{}'",
            tar_path.display()
        ))
        .run()?;

    fs::remove_file(&tar_path).with_context(|| {
        format!(
            "removing intermediate archive '{}' after extraction",
            tar_path.display()
        )
    })?;

    Ok(tar_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_intermediate_tar_name() {
        let name = intermediate_tar_name(Path::new("/builds/build.zip")).unwrap();
        assert_eq!(name, "build.tar");
    }

    #[test]
    fn test_intermediate_tar_name_rejects_other_suffixes() {
        assert!(intermediate_tar_name(Path::new("build.tgz")).is_err());
        assert!(intermediate_tar_name(Path::new("build.tar")).is_err());
    }

    #[test]
    fn test_recreate_work_dir_clears_stale_contents() {
        let temp = TempDir::new().unwrap();
        let layout = SuiteLayout::new(temp.path());

        fs::create_dir_all(&layout.work_dir).unwrap();
        fs::write(layout.work_dir.join("stale.vst3"), b"old").unwrap();

        recreate_work_dir(&layout).unwrap();

        assert!(layout.work_dir.exists());
        assert!(!layout.work_dir.join("stale.vst3").exists());
    }

    // Builds the real artifact shape: a tar named .zip wrapping a .tar of
    // the distribution tree. Exercises the full two-step extraction with
    // the system tar.
    fn make_artifact(staging: &Path) -> PathBuf {
        let tree = staging.join("payload");
        fs::create_dir_all(tree.join("VST3/ear-production-suite")).unwrap();
        fs::write(
            tree.join("VST3/ear-production-suite/Object Input.vst3"),
            b"plugin",
        )
        .unwrap();

        let tar_path = staging.join("build.tar");
        Cmd::new("tar")
            .args(["-cf"])
            .arg_path(&tar_path)
            .args(["-C"])
            .arg_path(&tree)
            .arg(".")
            .run()
            .unwrap();

        let artifact = staging.join("build.zip");
        Cmd::new("tar")
            .args(["-cf"])
            .arg_path(&artifact)
            .args(["-C"])
            .arg_path(staging)
            .arg("build.tar")
            .run()
            .unwrap();
        fs::remove_file(&tar_path).unwrap();
        fs::remove_dir_all(&tree).unwrap();

        artifact
    }

    #[test]
    fn test_extract_artifact_populates_fresh_work_dir() {
        let temp = TempDir::new().unwrap();
        let layout = SuiteLayout::new(temp.path());
        let artifact = make_artifact(temp.path());

        fs::create_dir_all(&layout.work_dir).unwrap();
        fs::write(layout.work_dir.join("leftover.txt"), b"stale").unwrap();

        let tar_path = extract_artifact(&artifact, &layout).unwrap();

        assert!(layout
            .plugin_dir
            .join("Object Input.vst3")
            .exists());
        assert!(!layout.work_dir.join("leftover.txt").exists());
        // intermediate archive is consumed
        assert!(!tar_path.exists());
        // the artifact itself is kept
        assert!(artifact.exists());
    }

    #[test]
    fn test_extract_artifact_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let layout = SuiteLayout::new(temp.path());

        let err = extract_artifact(&temp.path().join("absent.zip"), &layout).unwrap_err();
        assert!(err.to_string().contains("absent.zip"));
    }
}
