/// dirscope Core — scanning, ranking, and persistence.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI, TUI).
///
/// # Modules
///
/// - [`model`] — Scan result types and size formatting.
/// - [`scanner`] — Parallel per-subdirectory size scanning with progress reporting.
/// - [`analysis`] — Post-scan ranking into a top-N + "Other" view.
/// - [`store`] — SQLite snapshot persistence (latest scan only).
/// - [`error`] — Error taxonomy for the scan and store boundaries.
pub mod analysis;
pub mod error;
pub mod model;
pub mod scanner;
pub mod store;

pub use error::{ScanError, StoreError};
pub use model::{ScanResult, SubdirEntry};
