/// Error taxonomy for the scan and store boundaries.
///
/// Only two conditions are fatal for a scan and surface to the caller:
/// the root itself being unusable, and the caller supplying no root at all.
/// Races encountered *below* the root during traversal (a subtree turning
/// unreadable, a file vanishing between listing and stat) are absorbed by
/// the walker and never appear here.
use std::path::PathBuf;

use thiserror::Error;

/// Fatal scan errors, raised before any worker task is scheduled.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root path does not exist or cannot be listed.
    #[error("cannot read scan root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root path exists but is not a directory.
    #[error("scan root {path} is not a directory")]
    RootNotADirectory { path: PathBuf },

    /// The caller supplied an empty root path. A no-op, not a failure of
    /// any filesystem operation.
    #[error("no directory selected")]
    NoSelection,
}

/// Errors from the snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Creating the database's parent directory failed.
    #[error("cannot create snapshot directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted metadata row is malformed (e.g. an unparseable
    /// timestamp written by a different version).
    #[error("corrupt snapshot metadata: {0}")]
    CorruptMeta(String),
}
