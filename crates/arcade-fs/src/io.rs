//! Atomic install operations with file locking

use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::{Error, Result};

/// Write a byte stream atomically to `dest`.
///
/// Streams into a temporary sibling file (same directory, so the final
/// rename stays on one filesystem where possible), holding an advisory lock
/// for the duration of the write, then installs it over `dest` via
/// [`replace_atomic`]. A pre-existing destination is never touched until the
/// stream has been fully written and synced.
///
/// Returns the number of bytes written.
pub fn write_stream_atomic(dest: &Path, reader: &mut dyn Read) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_sibling(dest);
    let written = write_locked(&temp_path, dest, reader);

    match written {
        Ok(n) => {
            replace_atomic(&temp_path, dest)?;
            Ok(n)
        }
        Err(e) => {
            // Leave dest as it was; only the temporary is discarded.
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

/// Install `temp` over `dest`, preferring a platform rename.
///
/// Falls back to delete-destination + copy + delete-temporary when the
/// rename fails, e.g. across storage boundaries.
pub fn replace_atomic(temp: &Path, dest: &Path) -> Result<()> {
    if fs::rename(temp, dest).is_ok() {
        return Ok(());
    }

    debug!(dest = %dest.display(), "rename failed, falling back to copy");
    if dest.exists() {
        fs::remove_file(dest).map_err(|e| Error::io(dest, e))?;
    }
    fs::copy(temp, dest).map_err(|e| Error::io(dest, e))?;
    fs::remove_file(temp).map_err(|e| Error::io(temp, e))?;
    Ok(())
}

fn write_locked(temp_path: &Path, dest: &Path, reader: &mut dyn Read) -> Result<u64> {
    let mut temp = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp.lock_exclusive().map_err(|_| Error::LockFailed {
        path: dest.to_path_buf(),
    })?;

    let written = io::copy(reader, &mut temp).map_err(|e| Error::io(temp_path, e))?;

    temp.sync_all().map_err(|e| Error::io(temp_path, e))?;

    temp.unlock().map_err(|_| Error::LockFailed {
        path: dest.to_path_buf(),
    })?;

    Ok(written)
}

/// Temporary sibling path for an in-flight install of `dest`.
fn temp_sibling(dest: &Path) -> PathBuf {
    let name = format!(
        ".{}.{}.download",
        dest.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    dest.with_file_name(name)
}
