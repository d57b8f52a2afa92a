//! First-run installation and startup reconciliation

use std::fs;

use arcade_config::{Migrator, VideoSettings};
use arcade_fs::{AssetDir, DataRoot};
use arcade_sync::BundledTree;
use tracing::info;

use crate::error::Result;

/// Bring the data root up to date on startup.
///
/// Mirrors every bundled top-level directory into the root — existing files
/// are owned by the user and never overwritten — then migrates the settings
/// INI. Safe to invoke on every launch; a fully installed, fully migrated
/// root produces zero writes.
pub fn initialize(bundle: &BundledTree, data_root: &DataRoot) -> Result<()> {
    fs::create_dir_all(data_root.path())
        .map_err(|e| arcade_fs::Error::io(data_root.path(), e))?;

    for dir in AssetDir::ALL {
        bundle.install(dir.as_str(), &data_root.asset_dir(dir))?;
    }

    let migrated = Migrator::new().migrate(&data_root.settings_ini());
    if migrated {
        info!(root = %data_root, "settings migrated to current defaults");
    }

    Ok(())
}

/// Write the user's video settings through to the settings INI.
///
/// Invoked on every settings change and again before launch, after the
/// external tree sync may have replaced the INI.
pub fn apply_video_settings(data_root: &DataRoot, settings: &VideoSettings) -> Result<()> {
    let ini = data_root.settings_ini();
    settings
        .apply(&ini)
        .map_err(|e| arcade_fs::Error::io(ini, e))?;
    Ok(())
}
