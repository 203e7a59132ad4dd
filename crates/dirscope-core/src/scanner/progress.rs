/// Scan progress reporting — lightweight messages sent from the scan
/// coordinator to the consumer via a crossbeam channel.
///
/// Delivering progress as channel messages (rather than direct callbacks
/// from worker threads) means updates always arrive on whatever thread the
/// consumer drains the channel from — a single-threaded UI event loop can
/// poll it once per frame without any cross-thread marshalling of its own.

use std::time::Duration;

use crate::model::ScanResult;

/// How many task completions between progress updates.
///
/// One message per completion would flood a rendering consumer on roots
/// with thousands of subdirectories; every tenth completion (plus the final
/// one, unconditionally) bounds the update rate while keeping the bar
/// honest.
pub const PROGRESS_EVERY: usize = 10;

/// Progress updates sent from the scan coordinator to the consumer.
#[derive(Debug)]
pub enum ScanProgress {
    /// Periodic update: `completed` of `total` subdirectory tasks done.
    /// Sent every [`PROGRESS_EVERY`] completions and always for the final
    /// completion, in completion order.
    Update { completed: usize, total: usize },

    /// Scanning completed. Carries the aggregated, ranked result — the
    /// barrier has been passed: every submitted subdirectory contributed
    /// exactly one entry.
    Complete {
        result: ScanResult,
        duration: Duration,
    },

    /// Scan was cancelled before completion; no result is produced.
    Cancelled,
}
