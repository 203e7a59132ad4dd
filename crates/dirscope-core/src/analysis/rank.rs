/// Top-N + "Other" ranking over a completed scan.
///
/// Extracts the N largest subdirectories for display and collapses the
/// remainder into a single synthetic bucket, so charts and tables stay
/// readable on roots with hundreds of subdirectories.
use serde::Serialize;

use crate::model::{ScanResult, SubdirEntry};

/// Number of entries shown individually before the rest collapse into
/// the "Other" bucket.
pub const DEFAULT_TOP_N: usize = 10;

/// Display-oriented view of a scan: the N largest entries plus the summed
/// remainder.
///
/// Invariant: `top.iter().map(|e| e.size).sum::<u64>() + other_size` equals
/// the `total_size` of the [`ScanResult`] it was derived from. Recomputed
/// from each scan, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RankedView {
    /// Up to N entries, largest first.
    pub top: Vec<SubdirEntry>,
    /// Combined size of everything beyond the top N; 0 when nothing
    /// overflowed.
    pub other_size: u64,
}

impl RankedView {
    /// Whether an "Other" bucket should be rendered at all.
    pub fn has_other(&self) -> bool {
        self.other_size > 0
    }
}

/// Derive the top-`n` view from a scan result.
///
/// `result.entries` is already sorted largest-first, so this is a split at
/// `n`: the head is cloned into `top`, the tail is summed into `other_size`.
pub fn ranked_view(result: &ScanResult, n: usize) -> RankedView {
    let top: Vec<SubdirEntry> = result.entries.iter().take(n).cloned().collect();
    let other_size = result.entries.iter().skip(n).map(|e| e.size).sum();
    RankedView { top, other_size }
}
