/// Snapshot store integration tests against a real database file, plus the
/// full scan → persist → load pipeline.
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use dirscope_core::scanner::{start_scan, ScanProgress};
use dirscope_core::store::SnapshotStore;
use dirscope_core::SubdirEntry;
use tempfile::TempDir;

#[test]
fn snapshot_survives_reopen() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("snapshots").join("dirscope.db");

    {
        let mut store = SnapshotStore::open(&db).unwrap();
        store
            .replace_snapshot(
                Path::new("/srv"),
                &[SubdirEntry::new("logs", 4_096), SubdirEntry::new("www", 128)],
            )
            .unwrap();
    }

    let store = SnapshotStore::open(&db).unwrap();
    let loaded = store.load_snapshot().unwrap();
    assert_eq!(
        loaded,
        vec![SubdirEntry::new("logs", 4_096), SubdirEntry::new("www", 128)]
    );

    let info = store.snapshot_info().unwrap().unwrap();
    assert_eq!(info.root, Path::new("/srv"));
    assert_eq!(info.total_size, 4_224);
    // Written moments ago.
    assert!(Utc::now().signed_duration_since(info.scanned_at).num_seconds() < 60);
}

#[test]
fn equal_sizes_load_in_name_order() {
    let tmp = TempDir::new().unwrap();
    let mut store = SnapshotStore::open(&tmp.path().join("t.db")).unwrap();
    store
        .replace_snapshot(
            Path::new("/x"),
            &[
                SubdirEntry::new("zeta", 5),
                SubdirEntry::new("alpha", 5),
                SubdirEntry::new("big", 9),
            ],
        )
        .unwrap();

    let names: Vec<String> = store
        .load_snapshot()
        .unwrap()
        .iter()
        .map(|e| e.name.to_string())
        .collect();
    assert_eq!(names, ["big", "alpha", "zeta"]);
}

/// Scan a real tree, persist the result, and read it back — the persisted
/// rows must match the scan's entries exactly (both are size-descending).
#[test]
fn scan_results_round_trip_through_the_store() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    fs::create_dir(&root).unwrap();
    for (name, size) in [("media", 5_000usize), ("docs", 120), ("empty", 0)] {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        if size > 0 {
            let mut f = fs::File::create(dir.join("payload.bin")).unwrap();
            f.write_all(&vec![0u8; size]).unwrap();
        }
    }

    let handle = start_scan(root.clone()).unwrap();
    let result = loop {
        match handle.progress_rx.recv_timeout(Duration::from_secs(30)) {
            Ok(ScanProgress::Complete { result, .. }) => break result,
            Ok(_) => continue,
            Err(err) => panic!("scan did not finish: {err}"),
        }
    };

    let mut store = SnapshotStore::open(&tmp.path().join("scan.db")).unwrap();
    store.replace_snapshot(&root, &result.entries).unwrap();

    assert_eq!(store.load_snapshot().unwrap(), result.entries);
    assert_eq!(
        store.snapshot_info().unwrap().unwrap().total_size,
        result.total_size
    );
}
