/// Per-subdirectory size walker — the unit of work executed on the pool.
///
/// Sums the sizes of all files reachable by recursive descent under one
/// subdirectory. The walk is sequential; parallelism lives one level up,
/// across subdirectories. The function is total: it always returns a count,
/// absorbing the two race classes a live filesystem can produce mid-walk
/// (a subtree turning unreadable, a file vanishing between listing and
/// stat) and contributing whatever was summed before the race. The result
/// can therefore undercount relative to the instant of listing; that is an
/// accepted race, not a bug.
use std::io::ErrorKind;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// How many directory entries to process between cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 1_000;

/// Compute the total size in bytes of all files under `path`.
///
/// Symlinks are not followed. Returns the partial sum accumulated so far if
/// `cancel` is raised mid-walk; the coordinator discards the result in that
/// case, so partiality is harmless.
///
/// Error handling is deliberately narrow: `NotFound` and `PermissionDenied`
/// are the anticipated filesystem races and are absorbed at `debug`; any
/// other error kind is unexpected and logged at `warn`, but the walk still
/// continues — a best-effort estimate beats an aborted scan.
pub fn subtree_size(path: &Path, cancel: &AtomicBool) -> u64 {
    let mut total: u64 = 0;
    let mut entries_seen: u64 = 0;

    for entry_result in WalkDir::new(path).follow_links(false) {
        entries_seen += 1;
        if entries_seen % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
            return total;
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // Unreadable or vanished directory: walkdir has already
                // skipped the subtree's remaining contents for us.
                log_skipped("subtree", &err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.metadata() {
            Ok(meta) => total += meta.len(),
            Err(err) => {
                // Listed but gone by stat time: skip this file, keep siblings.
                log_skipped("file", &err);
            }
        }
    }

    total
}

fn log_skipped(what: &str, err: &walkdir::Error) {
    let kind = err.io_error().map(std::io::Error::kind);
    match kind {
        Some(ErrorKind::NotFound) | Some(ErrorKind::PermissionDenied) => {
            debug!("skipping {what}: {err}");
        }
        _ => warn!("skipping {what} (unexpected error): {err}"),
    }
}
