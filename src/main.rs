//! dirscope — parallel subdirectory disk-usage analyser.
//!
//! Thin binary entry point: parses arguments, drains the scan's progress
//! channel, persists the snapshot, and renders the ranked view. All engine
//! logic lives in the `dirscope-core` crate.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use dirscope_core::analysis::{ranked_view, DEFAULT_TOP_N};
use dirscope_core::model::format_size;
use dirscope_core::scanner::{start_scan, ScanProgress};
use dirscope_core::store::SnapshotStore;
use dirscope_core::ScanResult;

#[derive(Parser)]
#[command(
    name = "dirscope",
    version,
    about = "Ranks the immediate subdirectories of a root by total disk usage"
)]
struct Cli {
    /// Directory whose immediate subdirectories will be sized.
    root: PathBuf,

    /// How many entries to show individually before collapsing the rest
    /// into an "Other" bucket.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Snapshot database path. Each scan fully replaces the stored snapshot.
    #[arg(long, default_value = "dirscope.db")]
    db: PathBuf,

    /// Emit the ranked view as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialise structured logging. Diagnostics go to stderr so `--json`
    // output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let handle = start_scan(cli.root.clone())?;
    let result = loop {
        match handle.progress_rx.recv() {
            Ok(ScanProgress::Update { completed, total }) => {
                eprintln!("scanned {completed}/{total} subdirectories");
            }
            Ok(ScanProgress::Complete { result, duration }) => {
                tracing::info!("scan finished in {duration:?}");
                break result;
            }
            Ok(ScanProgress::Cancelled) => anyhow::bail!("scan was cancelled"),
            Err(_) => anyhow::bail!("scan thread ended without a result"),
        }
    };

    // Persist before rendering, matching the scan -> save -> render flow.
    let mut store =
        SnapshotStore::open(&cli.db).with_context(|| format!("opening {}", cli.db.display()))?;
    store.replace_snapshot(&cli.root, &result.entries)?;

    if cli.json {
        print_json(&result, cli.top)?;
    } else {
        print_table(&result, cli.top);
    }
    Ok(())
}

fn print_table(result: &ScanResult, top: usize) {
    let view = ranked_view(result, top);
    for entry in &view.top {
        println!("{:<40} {:>14}", entry.name, format_size(entry.size));
    }
    if view.has_other() {
        println!("{:<40} {:>14}", "Other", format_size(view.other_size));
    }
    println!("\nTotal size: {}", format_size(result.total_size));
}

fn print_json(result: &ScanResult, top: usize) -> anyhow::Result<()> {
    let view = ranked_view(result, top);
    let doc = serde_json::json!({
        "top": view.top,
        "other_size": view.other_size,
        "total_size": result.total_size,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
