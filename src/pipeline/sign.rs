//! Code signing of binaries and the finished disk image.
//!
//! Every distribution binary gets a timestamped, hardened-runtime
//! signature. App bundles and plugin bundles carry an Info.plist, so
//! codesign infers their identifier; the bare dylib and the bare
//! executable have no bundle metadata and need their identifier supplied
//! on the invocation. The disk image gets a plain signature with neither
//! flag.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::layout::{SuiteLayout, PLUGIN_EXTENSION};
use crate::process::Cmd;

/// Identifier for the REAPER extension dylib.
pub const REAPER_EXTENSION_ID: &str = "ch.ebu.eps.reaper_adm";

/// Identifier for the project upgrade command line executable.
pub const PROJECT_UPGRADE_ID: &str = "ch.ebu.eps.reaper_project_upgrade";

/// Collect every plugin bundle to sign.
///
/// The manifest is the union of a directory scan and one literal entry:
/// every `.vst3` directly under the plugin directory, plus the export
/// source plugin packaged beside it. Scan order is made deterministic by
/// sorting; the literal entry always comes last.
pub fn plugin_manifest(layout: &SuiteLayout) -> Result<Vec<PathBuf>> {
    let mut plugins = Vec::new();

    for entry in WalkDir::new(&layout.plugin_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| {
            format!("scanning plugin directory '{}'", layout.plugin_dir.display())
        })?;
        if entry
            .path()
            .extension()
            .is_some_and(|ext| ext == PLUGIN_EXTENSION)
        {
            plugins.push(entry.into_path());
        }
    }

    plugins.push(layout.export_source_plugin.clone());
    Ok(plugins)
}

/// Apply a timestamped, hardened-runtime signature to one binary.
///
/// `identifier` is only passed for artifacts with no bundle metadata to
/// infer one from.
pub fn sign_binary(certificate: &str, path: &Path, identifier: Option<&str>) -> Result<()> {
    let mut cmd = Cmd::new("xcrun").args(["codesign", "--timestamp", "--options", "runtime"]);
    if let Some(id) = identifier {
        cmd = cmd.args(["-i", id]);
    }
    cmd.args(["-s", certificate])
        .arg_path(path)
        .error_msg(format!("signing '{}'", path.display()))
        .run()?;
    Ok(())
}

/// Every binary the distribution signs, in invocation order: the plugin
/// manifest, the two application bundles, then the bare dylib and the
/// bare executable with their explicit identifiers.
pub fn sign_targets(layout: &SuiteLayout) -> Result<Vec<(PathBuf, Option<&'static str>)>> {
    let mut targets: Vec<(PathBuf, Option<&'static str>)> = plugin_manifest(layout)?
        .into_iter()
        .map(|plugin| (plugin, None))
        .collect();

    targets.push((layout.setup_app.clone(), None));
    targets.push((layout.upgrade_gui_app.clone(), None));
    // Bare dylib and command line executable have no Info.plist to
    // derive an identifier from
    targets.push((layout.reaper_extension.clone(), Some(REAPER_EXTENSION_ID)));
    targets.push((layout.upgrade_tool.clone(), Some(PROJECT_UPGRADE_ID)));

    Ok(targets)
}

/// Sign every binary artifact in the distribution.
pub fn sign_distribution(certificate: &str, layout: &SuiteLayout) -> Result<()> {
    for (path, identifier) in sign_targets(layout)? {
        println!("[sign] {}", path.display());
        sign_binary(certificate, &path, identifier)?;
    }
    Ok(())
}

/// Sign the disk image (no timestamp, no hardened runtime).
pub fn sign_image(certificate: &str, image: &Path) -> Result<()> {
    Cmd::new("xcrun")
        .args(["codesign", "-s", certificate])
        .arg_path(image)
        .error_msg(format!("signing disk image '{}'", image.display()))
        .run()?;
    Ok(())
}
