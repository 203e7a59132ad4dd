/// Scanner module — orchestrates the parallel per-subdirectory scan.
///
/// A scan has three phases:
/// 1. **Enumerate** the root's immediate subdirectories ([`enumerate`]).
///    The only fatally-failing phase; errors surface before any thread
///    is spawned.
/// 2. **Fan out** one [`walker::subtree_size`] task per subdirectory onto a
///    fixed-size worker pool. Tasks are independent: no shared mutable
///    state, each reports one `(name, size)` completion over a channel.
/// 3. **Collect** completions on the coordinator until every task has
///    reported (a full barrier), emitting throttled progress messages,
///    then aggregate into a [`ScanResult`].
pub mod enumerate;
pub mod progress;
pub mod walker;

pub use enumerate::{subdirectories, Subdir};
pub use progress::{ScanProgress, PROGRESS_EVERY};

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error, info};

use crate::error::ScanError;
use crate::model::{ScanResult, SubdirEntry};

/// Maximum number of progress messages that may queue up in the channel.
///
/// Progress is already throttled to one message per [`PROGRESS_EVERY`]
/// completions, so a consumer that drains once per frame never comes close
/// to this. If it stalls entirely, the coordinator blocks rather than
/// consuming unbounded heap.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 256;

/// Handle to a running or completed scan. Allows cancellation and
/// receiving progress updates.
pub struct ScanHandle {
    /// Receiver for progress updates from the coordinator thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the coordinator thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Start a new scan of `root` on a background coordinator thread.
///
/// Enumeration happens synchronously, so the fatal error cases
/// ([`ScanError::RootUnreadable`], [`ScanError::RootNotADirectory`],
/// [`ScanError::NoSelection`]) are reported here and no task is ever
/// scheduled for them. On success the returned [`ScanHandle`] delivers
/// [`ScanProgress`] messages ending in either `Complete` or `Cancelled`.
pub fn start_scan(root: PathBuf) -> Result<ScanHandle, ScanError> {
    let subdirs = enumerate::subdirectories(&root)?;

    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();

    let thread = thread::Builder::new()
        .name("dirscope-scan".into())
        .spawn(move || run_scan(root, subdirs, progress_tx, cancel_clone))
        .expect("failed to spawn scan coordinator thread");

    Ok(ScanHandle {
        progress_rx,
        cancel_flag,
        _thread: Some(thread),
    })
}

/// Coordinator: fan out walker tasks, enforce the barrier, throttle progress.
fn run_scan(
    root: PathBuf,
    subdirs: Vec<Subdir>,
    progress_tx: Sender<ScanProgress>,
    cancel_flag: Arc<AtomicBool>,
) {
    let start = Instant::now();
    let total = subdirs.len();
    info!(
        "scanning {} subdirectories under {}",
        total,
        root.display()
    );

    if total == 0 {
        let _ = progress_tx.send(ScanProgress::Complete {
            result: ScanResult::from_entries(Vec::new()),
            duration: start.elapsed(),
        });
        return;
    }

    // Fixed-size pool, one slot per logical core. Traversal state is local
    // to each task, so there is nothing to lock.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .thread_name(|i| format!("dirscope-worker-{i}"))
        .build()
        .expect("failed to build scan worker pool");

    let (done_tx, done_rx) = crossbeam_channel::bounded::<SubdirEntry>(total);
    for subdir in subdirs {
        let done_tx = done_tx.clone();
        let cancel = cancel_flag.clone();
        pool.spawn(move || {
            let size = walker::subtree_size(&subdir.path, &cancel);
            // The coordinator may have gone away after cancellation.
            let _ = done_tx.send(SubdirEntry {
                name: subdir.name,
                size,
            });
        });
    }
    drop(done_tx);

    // Completion barrier: aggregation must not begin until every submitted
    // subdirectory has yielded exactly one entry. Completions arrive in
    // task-runtime order, not submission order; throttling is counted here
    // on the consuming side, decoupled from the pool's scheduling.
    let mut entries: Vec<SubdirEntry> = Vec::with_capacity(total);
    for completed in 1..=total {
        let entry = match done_rx.recv() {
            Ok(e) => e,
            Err(_) => {
                error!("worker pool disconnected after {} of {total} tasks", completed - 1);
                return;
            }
        };
        debug!("completed {}: {}", entry.name, entry.size);
        entries.push(entry);

        if cancel_flag.load(Ordering::Relaxed) {
            info!("scan cancelled after {completed} of {total} tasks");
            let _ = progress_tx.send(ScanProgress::Cancelled);
            return;
        }
        if completed % PROGRESS_EVERY == 0 || completed == total {
            let _ = progress_tx.send(ScanProgress::Update { completed, total });
        }
    }

    let result = ScanResult::from_entries(entries);
    let duration = start.elapsed();
    info!(
        "scan complete: {} entries, {} bytes total in {duration:?}",
        result.len(),
        result.total_size
    );
    let _ = progress_tx.send(ScanProgress::Complete { result, duration });
}
