//! Size-gated synchronization into the local cache

use std::fs;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::source::Fetched;

/// A planned copy: destination path plus the size the source vouches for.
///
/// The destination is considered fresh when it exists and its size exactly
/// equals a known-positive expected size; content is never re-verified
/// beyond size once fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedItem {
    pub name: String,
    pub dest: PathBuf,
    pub expected_size: Option<u64>,
}

impl CachedItem {
    pub fn new(name: impl Into<String>, dest: impl Into<PathBuf>, expected_size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            dest: dest.into(),
            expected_size,
        }
    }
}

/// What [`ensure`] did for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Destination already matched the expected size; nothing copied.
    Fresh,
    /// Content was copied and atomically installed.
    Installed,
}

/// Progress event for a multi-item batch.
///
/// `done` increases monotonically; no other ordering is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub name: String,
}

/// Result of a completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub total: usize,
    pub downloaded: usize,
    pub skipped: usize,
}

/// Realize `item` in the local cache, fetching only when stale.
///
/// A destination whose size equals a known-positive expected size is a cache
/// hit. Otherwise the fetched stream is written to a temporary sibling and
/// atomically installed; a failure on either step surfaces as a transfer
/// error for this item and leaves any previously valid destination intact.
pub fn ensure(item: &CachedItem, fetch: impl FnOnce() -> Result<Fetched>) -> Result<Outcome> {
    if is_fresh(item) {
        trace!(item = %item.name, "cache hit, size matches");
        return Ok(Outcome::Fresh);
    }

    let mut fetched = fetch()?;
    let written = arcade_fs::io::write_stream_atomic(&item.dest, &mut fetched.reader)
        .map_err(|e| Error::Install {
            item: item.name.clone(),
            source: e,
        })?;
    debug!(item = %item.name, bytes = written, "installed into cache");
    Ok(Outcome::Installed)
}

/// Realize every item in order, aborting the whole batch on the first
/// failure.
///
/// `progress` fires once per item before it is processed, with
/// monotonically increasing `done`.
pub fn sync_batch(
    items: &[CachedItem],
    mut fetch: impl FnMut(&CachedItem) -> Result<Fetched>,
    progress: &mut dyn FnMut(Progress),
) -> Result<SyncReport> {
    let total = items.len();
    let mut report = SyncReport {
        total,
        ..SyncReport::default()
    };

    for (idx, item) in items.iter().enumerate() {
        progress(Progress {
            done: idx + 1,
            total,
            name: item.name.clone(),
        });

        match ensure(item, || fetch(item))? {
            Outcome::Fresh => report.skipped += 1,
            Outcome::Installed => report.downloaded += 1,
        }
    }

    Ok(report)
}

fn is_fresh(item: &CachedItem) -> bool {
    let Some(expected) = item.expected_size else {
        return false;
    };
    if expected == 0 {
        return false;
    }
    fs::metadata(&item.dest).is_ok_and(|meta| meta.len() == expected)
}
