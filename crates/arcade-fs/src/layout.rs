//! Data-root layout for the launcher's sandboxed tree.

use std::fmt;
use std::path::{Path, PathBuf};

/// Top-level directories mirrored from the bundled assets on first install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetDir {
    /// Overlay art and shared textures
    Assets,
    /// Emulator configuration (settings INI, catalog file)
    Config,
    /// Graphics debugging captures
    GraphicsAnalysis,
    /// Battery-backed RAM images
    Nvram,
    /// Save states
    Saves,
}

impl AssetDir {
    /// All directories mirrored on first install, in install order.
    pub const ALL: [AssetDir; 5] = [
        AssetDir::Assets,
        AssetDir::Config,
        AssetDir::GraphicsAnalysis,
        AssetDir::Nvram,
        AssetDir::Saves,
    ];

    /// Get the on-disk directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assets => "Assets",
            Self::Config => "Config",
            Self::GraphicsAnalysis => "GraphicsAnalysis",
            Self::Nvram => "NVRAM",
            Self::Saves => "Saves",
        }
    }
}

impl AsRef<Path> for AssetDir {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for AssetDir {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AssetDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The local data root owned by the launcher.
///
/// All paths handed to collaborators (settings INI, catalog file, ROM cache)
/// are resolved through this type so the on-disk shape is defined in one
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRoot {
    root: PathBuf,
}

impl DataRoot {
    /// Wrap an existing or to-be-created root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the default platform location (`<data dir>/arcade-manager`).
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|d| Self::new(d.join("arcade-manager")))
    }

    /// The root directory itself.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// The configuration directory (`Config/`).
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(AssetDir::Config.as_str())
    }

    /// The emulator settings INI (`Config/Emulator.ini`).
    pub fn settings_ini(&self) -> PathBuf {
        self.config_dir().join("Emulator.ini")
    }

    /// The workload catalog file (`Config/Games.xml`).
    pub fn catalog_file(&self) -> PathBuf {
        self.config_dir().join("Games.xml")
    }

    /// The local ROM archive cache (`romcache/`).
    pub fn rom_cache(&self) -> PathBuf {
        self.root.join("romcache")
    }

    /// The synced flyer image cache (`Flyers/`).
    pub fn flyer_dir(&self) -> PathBuf {
        self.root.join("Flyers")
    }

    /// Resolve one of the bundled top-level directories.
    pub fn asset_dir(&self, dir: AssetDir) -> PathBuf {
        self.root.join(dir.as_str())
    }
}

impl fmt::Display for DataRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.display())
    }
}
