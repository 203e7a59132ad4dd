/// Snapshot store — SQLite persistence for the latest scan only.
///
/// Each scan fully supersedes the last: `replace_snapshot` deletes the
/// prior rows and inserts the new ones in one transaction, so readers never
/// observe a half-replaced snapshot. No history is kept. The store is only
/// touched after the scan barrier, from a single thread, so it needs no
/// internal synchronization for this workload.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags};
use tracing::debug;

use crate::error::StoreError;
use crate::model::SubdirEntry;

/// Context recorded alongside each snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    /// When the snapshot was written.
    pub scanned_at: DateTime<Utc>,
    /// The root that was scanned.
    pub root: PathBuf,
    /// Sum of all entry sizes at scan time.
    pub total_size: u64,
}

/// SQLite-backed store holding the (name, size) pairs of the most recent scan.
pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    /// Open (or create) the snapshot database at `path`, applying the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory store, used by tests and callers that don't want a file.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Durably replace the previous snapshot with `entries`.
    ///
    /// Runs in a single transaction: delete everything, insert the new
    /// rows, update the metadata row. A reader opening the database
    /// mid-scan sees either the old snapshot or the new one, never a mix.
    pub fn replace_snapshot(
        &mut self,
        root: &Path,
        entries: &[SubdirEntry],
    ) -> Result<(), StoreError> {
        let total_size: u64 = entries.iter().map(|e| e.size).sum();
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM subdirs", [])?;
        {
            let mut stmt = tx.prepare_cached("INSERT INTO subdirs (name, size) VALUES (?1, ?2)")?;
            for entry in entries {
                stmt.execute(params![entry.name.as_str(), entry.size])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO snapshot_meta (id, scanned_at, root, total_size)
             VALUES (1, ?1, ?2, ?3)",
            params![
                Utc::now().to_rfc3339(),
                root.to_string_lossy(),
                total_size
            ],
        )?;
        tx.commit()?;
        debug!("snapshot replaced: {} entries, {total_size} bytes", entries.len());
        Ok(())
    }

    /// Load the persisted snapshot, largest first (name ascending on ties).
    ///
    /// Returns an empty vec when no scan has been persisted yet.
    pub fn load_snapshot(&self) -> Result<Vec<SubdirEntry>, StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT name, size FROM subdirs ORDER BY size DESC, name ASC")?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let size: u64 = row.get(1)?;
            Ok(SubdirEntry::new(name, size))
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Metadata of the persisted snapshot, or `None` before the first scan.
    pub fn snapshot_info(&self) -> Result<Option<SnapshotInfo>, StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT scanned_at, root, total_size FROM snapshot_meta WHERE id = 1")?;
        let mut rows = stmt.query([])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let scanned_at: String = row.get(0)?;
        let root: String = row.get(1)?;
        let total_size: u64 = row.get(2)?;
        let scanned_at = DateTime::parse_from_rfc3339(&scanned_at)
            .map_err(|e| StoreError::CorruptMeta(format!("scanned_at: {e}")))?
            .with_timezone(&Utc);
        Ok(Some(SnapshotInfo {
            scanned_at,
            root: PathBuf::from(root),
            total_size,
        }))
    }
}

fn apply_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS subdirs (
            name TEXT NOT NULL,
            size INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS snapshot_meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            scanned_at TEXT NOT NULL,
            root TEXT NOT NULL,
            total_size INTEGER NOT NULL
        );",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_no_snapshot() {
        let store = SnapshotStore::open_in_memory().unwrap();
        assert!(store.load_snapshot().unwrap().is_empty());
        assert!(store.snapshot_info().unwrap().is_none());
    }

    #[test]
    fn load_returns_size_descending() {
        let mut store = SnapshotStore::open_in_memory().unwrap();
        store
            .replace_snapshot(
                Path::new("/data"),
                &[
                    SubdirEntry::new("small", 10),
                    SubdirEntry::new("big", 900),
                    SubdirEntry::new("mid", 40),
                ],
            )
            .unwrap();

        let loaded = store.load_snapshot().unwrap();
        let names: Vec<&str> = loaded.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["big", "mid", "small"]);
    }

    #[test]
    fn new_snapshot_fully_supersedes_the_old() {
        let mut store = SnapshotStore::open_in_memory().unwrap();
        store
            .replace_snapshot(Path::new("/a"), &[SubdirEntry::new("old", 1)])
            .unwrap();
        store
            .replace_snapshot(Path::new("/b"), &[SubdirEntry::new("new", 2)])
            .unwrap();

        let loaded = store.load_snapshot().unwrap();
        assert_eq!(loaded, vec![SubdirEntry::new("new", 2)]);

        let info = store.snapshot_info().unwrap().unwrap();
        assert_eq!(info.root, PathBuf::from("/b"));
        assert_eq!(info.total_size, 2);
    }
}
