//! Path definitions for the distribution staging area.
//!
//! The build artifact unpacks into a working directory under a staging
//! root; every signed artifact lives at a fixed path inside that working
//! directory. This module only defines WHERE things are, not HOW they are
//! produced, so the whole pipeline can run against an injected temporary
//! root in tests.

use std::path::{Path, PathBuf};

/// Name of the working directory recreated under the staging root on
/// every run.
pub const WORK_DIR_NAME: &str = "tmp";

/// Bundle extension used for plugin discovery.
pub const PLUGIN_EXTENSION: &str = "vst3";

/// Paths used during signing and packaging.
pub struct SuiteLayout {
    /// Staging root; the artifact is extracted here and the disk image is
    /// written here.
    pub staging: PathBuf,
    /// Working directory holding the unpacked distribution contents.
    pub work_dir: PathBuf,
    /// Directory scanned for `.vst3` plugin bundles.
    pub plugin_dir: PathBuf,
    /// Plugin bundle built from a separate source tree, packaged beside
    /// the scanned directory.
    pub export_source_plugin: PathBuf,
    /// Installer application bundle.
    pub setup_app: PathBuf,
    /// Project upgrade GUI application bundle.
    pub upgrade_gui_app: PathBuf,
    /// REAPER extension; a bare dylib with no bundle metadata.
    pub reaper_extension: PathBuf,
    /// Project upgrade command line executable; no bundle metadata.
    pub upgrade_tool: PathBuf,
}

impl SuiteLayout {
    /// Create the layout relative to a staging root.
    pub fn new(staging: &Path) -> Self {
        let work_dir = staging.join(WORK_DIR_NAME);
        Self {
            staging: staging.to_path_buf(),
            plugin_dir: work_dir.join("VST3/ear-production-suite"),
            export_source_plugin: work_dir.join("VST3/ADM Export Source.vst3"),
            setup_app: work_dir.join("Setup EAR Production Suite.app"),
            upgrade_gui_app: work_dir.join("Tools/Project Upgrade Utility GUI.app"),
            reaper_extension: work_dir.join("UserPlugins/reaper_adm.dylib"),
            upgrade_tool: work_dir.join("Tools/project_upgrade"),
            work_dir,
        }
    }

    /// Path of the output disk image for a given base name.
    pub fn image_path(&self, output_name: &str) -> PathBuf {
        self.staging.join(format!("{output_name}.dmg"))
    }
}
