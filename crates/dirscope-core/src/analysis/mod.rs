/// Analysis modules — post-scan algorithms over a completed [`crate::model::ScanResult`].

pub mod rank;

pub use rank::{ranked_view, RankedView, DEFAULT_TOP_N};
