//! Stage orchestration.
//!
//! Control flows strictly extract -> sign -> image -> sign image, one
//! external tool at a time. The first failing stage aborts the run with
//! an error naming the stage and the artifact it was working on.

pub mod extract;
pub mod image;
pub mod sign;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::layout::SuiteLayout;

/// Run the full pipeline against a staging root.
///
/// `artifact` may be relative to the caller's working directory; it is
/// resolved before extraction because the extractor runs tar with the
/// staging root as its working directory. Returns the path of the signed
/// disk image.
pub fn run(
    certificate: &str,
    artifact: &Path,
    output_name: &str,
    staging: &Path,
) -> Result<PathBuf> {
    let layout = SuiteLayout::new(staging);
    let artifact = artifact
        .canonicalize()
        .with_context(|| format!("resolving artifact path '{}'", artifact.display()))?;

    println!("[extract] {}", artifact.display());
    extract::extract_artifact(&artifact, &layout)
        .with_context(|| format!("extracting '{}'", artifact.display()))?;

    sign::sign_distribution(certificate, &layout).context("signing distribution binaries")?;

    println!("[image] {}.dmg", output_name);
    let image = image::build_image(output_name, &layout)
        .with_context(|| format!("building disk image for '{output_name}'"))?;

    println!("[sign] {}", image.display());
    sign::sign_image(certificate, &image)
        .with_context(|| format!("signing disk image '{}'", image.display()))?;

    Ok(image)
}
