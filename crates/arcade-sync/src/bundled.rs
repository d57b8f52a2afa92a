//! Bundled read-only asset tree

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cache::{CachedItem, ensure};
use crate::error::{Error, Result};
use crate::source::{ContentSource, Fetched};

/// The read-only assets shipped with the launcher.
///
/// Mirrored into the data root on first install. Bundled files are installed
/// once and then owned by the user: an existing destination is never
/// overwritten, whatever its content or size.
#[derive(Debug, Clone)]
pub struct BundledTree {
    root: PathBuf,
}

impl BundledTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Mirror the named subtree into `dest`.
    ///
    /// A node with children is a directory to recurse into; anything else is
    /// a leaf file. An absent subtree is a no-op — not every bundled
    /// directory ships populated.
    pub fn install(&self, subtree: &str, dest: &Path) -> Result<()> {
        let src = self.root.join(subtree);
        if !src.exists() {
            return Ok(());
        }
        self.copy_tree(&src, dest, subtree)
    }

    fn copy_tree(&self, src: &Path, dest: &Path, rel: &str) -> Result<()> {
        if src.is_dir() {
            fs::create_dir_all(dest).map_err(|e| Error::stream(rel, e))?;
            let entries = fs::read_dir(src).map_err(|e| Error::stream(rel, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| Error::stream(rel, e))?;
                let name = entry.file_name();
                let child_rel = format!("{rel}/{}", name.to_string_lossy());
                self.copy_tree(&entry.path(), &dest.join(&name), &child_rel)?;
            }
            return Ok(());
        }

        if dest.exists() {
            return Ok(());
        }

        debug!(asset = rel, "installing bundled file");
        let item = CachedItem::new(rel, dest, None);
        ensure(&item, || self.open(rel))?;
        Ok(())
    }
}

impl ContentSource for BundledTree {
    /// Open a bundled file by its path relative to the tree root.
    fn open(&self, id: &str) -> Result<Fetched> {
        let path = self.root.join(id);
        if !path.is_file() {
            return Err(Error::not_found(id));
        }
        let file = File::open(&path).map_err(|e| Error::stream(id, e))?;
        let size = file.metadata().ok().map(|m| m.len());
        Ok(Fetched::new(file, size))
    }
}
