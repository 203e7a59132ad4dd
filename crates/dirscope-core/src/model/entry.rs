/// Scan result types.
///
/// A scan produces one [`SubdirEntry`] per immediate subdirectory of the
/// root, collected into a [`ScanResult`] whose entries are sorted and whose
/// total is the sum of all entry sizes. Both types are immutable once
/// produced — each new scan supersedes the previous result wholesale rather
/// than merging into it.
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One immediate subdirectory of the scan root and its total size.
///
/// Name only (NOT the full path) — the root is known to the scan session.
/// The size is the best-effort sum of all file bytes reachable under the
/// subdirectory; concurrent filesystem mutation can make it an undercount,
/// which is accepted rather than treated as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdirEntry {
    pub name: CompactString,
    pub size: u64,
}

impl SubdirEntry {
    pub fn new(name: impl AsRef<str>, size: u64) -> Self {
        Self {
            name: CompactString::new(name.as_ref()),
            size,
        }
    }
}

/// The complete, ordered result of one scan.
///
/// Invariant: `total_size == entries.iter().map(|e| e.size).sum()`, and
/// `entries` is sorted by size descending, name ascending on ties. Both are
/// established by [`ScanResult::from_entries`] and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub entries: Vec<SubdirEntry>,
    pub total_size: u64,
}

impl ScanResult {
    /// Aggregate raw per-subdirectory entries into an ordered result.
    ///
    /// The sum is commutative, so the nondeterministic completion order of
    /// the worker pool does not affect `total_size`. Ordering is made
    /// deterministic here: size descending, then name ascending.
    pub fn from_entries(mut entries: Vec<SubdirEntry>) -> Self {
        let total_size = entries.iter().map(|e| e.size).sum();
        entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
        Self {
            entries,
            total_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entries_sorts_descending() {
        let result = ScanResult::from_entries(vec![
            SubdirEntry::new("small", 10),
            SubdirEntry::new("big", 1_000),
            SubdirEntry::new("mid", 500),
        ]);
        let names: Vec<&str> = result.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["big", "mid", "small"]);
        assert_eq!(result.total_size, 1_510);
    }

    #[test]
    fn equal_sizes_tie_break_on_name() {
        let result = ScanResult::from_entries(vec![
            SubdirEntry::new("zeta", 100),
            SubdirEntry::new("alpha", 100),
            SubdirEntry::new("mu", 100),
        ]);
        let names: Vec<&str> = result.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["alpha", "mu", "zeta"]);
    }

    #[test]
    fn total_is_order_independent() {
        let a = ScanResult::from_entries(vec![
            SubdirEntry::new("a", 1),
            SubdirEntry::new("b", 2),
            SubdirEntry::new("c", 3),
        ]);
        let b = ScanResult::from_entries(vec![
            SubdirEntry::new("c", 3),
            SubdirEntry::new("a", 1),
            SubdirEntry::new("b", 2),
        ]);
        assert_eq!(a.total_size, b.total_size);
        assert_eq!(a.entries, b.entries);
    }

    #[test]
    fn empty_scan_is_zero() {
        let result = ScanResult::from_entries(Vec::new());
        assert!(result.is_empty());
        assert_eq!(result.total_size, 0);
    }
}
