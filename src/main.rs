use std::path::PathBuf;

use clap::Parser;

/// Compares two pod-list snapshots of a namespace and prints a report of
/// the differences that survive noise filtering.
#[derive(Parser)]
#[command(name = "pod-compare", version, about)]
struct Cli {
    /// Pod-list JSON document for the first snapshot
    before: PathBuf,
    /// Pod-list JSON document for the second snapshot
    after: PathBuf,
}

/// Entry point for the pod-compare snapshot diffing tool.
///
/// # Errors
///
/// Returns an error if a snapshot file cannot be loaded or contains a
/// malformed pod descriptor.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug pod-compare before.json after.json
/// ```
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let report = pod_compare::run(&cli.before, &cli.after)?;
    print!("{report}");
    Ok(())
}
