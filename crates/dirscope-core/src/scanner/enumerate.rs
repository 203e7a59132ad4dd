/// Root enumeration — lists the immediate subdirectories of the scan root.
///
/// This is the only stage of a scan that can fail fatally: if the root
/// itself cannot be listed there is nothing to schedule, so the error
/// surfaces to the caller before any worker thread is spawned. No recursion
/// happens here; recursive descent is the walker's job.
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use tracing::debug;

use crate::error::ScanError;

/// One immediate subdirectory of the scan root, pending size calculation.
#[derive(Debug, Clone)]
pub struct Subdir {
    /// Directory name relative to the root.
    pub name: CompactString,
    /// Absolute path, handed to the walker task.
    pub path: PathBuf,
}

/// List the immediate child directories of `root`.
///
/// Files and other non-directory entries are excluded. Symlinks are not
/// followed, so a symlink to a directory is excluded too. Children whose
/// type cannot be determined (vanished between listing and stat) are
/// skipped. The returned list is sorted by name so task submission order is
/// deterministic even though completion order is not.
///
/// # Errors
///
/// - [`ScanError::NoSelection`] if `root` is empty.
/// - [`ScanError::RootNotADirectory`] if `root` exists but is not a directory.
/// - [`ScanError::RootUnreadable`] if `root` is missing or cannot be listed.
pub fn subdirectories(root: &Path) -> Result<Vec<Subdir>, ScanError> {
    if root.as_os_str().is_empty() {
        return Err(ScanError::NoSelection);
    }

    let meta = std::fs::metadata(root).map_err(|source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ScanError::RootNotADirectory {
            path: root.to_path_buf(),
        });
    }

    let read_dir = std::fs::read_dir(root).map_err(|source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut subdirs = Vec::new();
    for entry in read_dir {
        // A child that vanishes while we iterate is skipped, not fatal —
        // only the root itself aborts the scan.
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!("skipping unreadable child of {}: {err}", root.display());
                continue;
            }
        };
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(err) => {
                debug!("skipping untyped child {:?}: {err}", entry.path());
                continue;
            }
        };
        if !file_type.is_dir() {
            continue;
        }
        subdirs.push(Subdir {
            name: CompactString::new(entry.file_name().to_string_lossy().as_ref()),
            path: entry.path(),
        });
    }

    subdirs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(subdirs)
}
