//! Externally chosen archive store

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::source::{ContentSource, Fetched};

/// Archive extension recognized in the external store.
const ARCHIVE_EXT: &str = ".zip";

/// One archive found in the external store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    pub path: PathBuf,
    pub size: u64,
}

/// A user-chosen directory holding the large ROM archives, indexed by
/// basename.
///
/// The scan is non-recursive and tolerant: an unset or unreadable directory
/// simply yields an empty index, the same as a store with nothing in it.
#[derive(Debug, Clone, Default)]
pub struct ExternalStore {
    index: HashMap<String, ArchiveFile>,
}

impl ExternalStore {
    /// Scan `root` for archives.
    pub fn scan(root: &Path) -> Self {
        let mut index = HashMap::new();

        let Ok(entries) = std::fs::read_dir(root) else {
            debug!(root = %root.display(), "external store unreadable, treating as empty");
            return Self::default();
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let Some(base) = strip_archive_ext(&name) else {
                continue;
            };
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            index.insert(
                base.to_string(),
                ArchiveFile {
                    path,
                    size: meta.len(),
                },
            );
        }

        debug!(root = %root.display(), archives = index.len(), "scanned external store");
        Self { index }
    }

    /// The basenames available in the store.
    pub fn available(&self) -> HashSet<String> {
        self.index.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&ArchiveFile> {
        self.index.get(name)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl ContentSource for ExternalStore {
    /// Open an archive by basename, yielding the stream and the file's
    /// reported length.
    fn open(&self, id: &str) -> Result<Fetched> {
        let archive = self.get(id).ok_or_else(|| Error::not_found(id))?;
        let file = File::open(&archive.path).map_err(|e| Error::stream(id, e))?;
        Ok(Fetched::new(file, Some(archive.size)))
    }
}

/// Strip the archive extension, case-insensitive; None for other files.
fn strip_archive_ext(name: &str) -> Option<&str> {
    let ext_start = name.len().checked_sub(ARCHIVE_EXT.len())?;
    if !name.is_char_boundary(ext_start) || !name[ext_start..].eq_ignore_ascii_case(ARCHIVE_EXT) {
        return None;
    }
    Some(&name[..ext_start])
}
