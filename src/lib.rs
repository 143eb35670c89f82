use std::path::Path;

/// Pod Compare: reports the meaningful differences between two
/// point-in-time pod-list snapshots of a container namespace.
///
/// Raw snapshots are normalized first (generated name suffixes, internal
/// management pods, injected env vars and volumes are stripped), then
/// corresponding entities are matched by stable identity at every level
/// and compared recursively into a diff tree, which the reporter renders
/// as a fixed-width table.
pub mod diff;
pub mod error;
pub mod normalize;
pub mod report;
pub mod snapshot;

/// Loads, normalizes, and compares the two snapshot files, returning the
/// rendered report.
///
/// # Errors
///
/// Possible errors include:
/// - a snapshot file that is missing, unreadable, or not a valid pod-list
///   document;
/// - a pod descriptor that lacks a required field.
pub fn run(before_path: &Path, after_path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let policy = normalize::Policy::default();

    let before = normalize::normalize(&snapshot::load(before_path)?, &policy)?;
    let after = normalize::normalize(&snapshot::load(after_path)?, &policy)?;
    log::debug!(
        "normalized {} pods from `{}` and {} pods from `{}`",
        before.len(),
        before_path.display(),
        after.len(),
        after_path.display()
    );

    let diff = diff::diff_pods(&before, &after);
    let changed = diff.iter().filter(|pod| !pod.is_unchanged()).count();
    log::debug!("{changed} of {} pods differ", diff.len());

    Ok(report::render(
        &diff,
        &before_path.display().to_string(),
        &after_path.display().to_string(),
    ))
}
