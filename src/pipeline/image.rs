//! Disk image assembly.
//!
//! Wraps `hdiutil create` to package the working directory as a
//! compressed, read-only UDZO image. The output base name is used
//! verbatim (spaces included) for both the image file name and the
//! mounted volume label.

use anyhow::Result;
use std::path::PathBuf;

use crate::layout::SuiteLayout;
use crate::process::Cmd;

/// Build `<output_name>.dmg` in the staging root from the working
/// directory. An existing image of the same name is overwritten.
pub fn build_image(output_name: &str, layout: &SuiteLayout) -> Result<PathBuf> {
    let image = layout.image_path(output_name);

    Cmd::new("hdiutil")
        .args(["create", "-volname", output_name, "-srcfolder"])
        .arg_path(&layout.work_dir)
        .args(["-ov", "-format", "UDZO"])
        .arg_path(&image)
        .error_msg(format!("creating disk image '{}'", image.display()))
        .run()?;

    Ok(image)
}
