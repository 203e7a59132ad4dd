/// Data model — scan result types and size formatting.

pub mod entry;
pub mod size;

pub use entry::{ScanResult, SubdirEntry};
pub use size::format_size;
