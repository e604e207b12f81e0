//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, FailureStats};
use crate::run::RunReport;

/// Prints per-kind failure counts to the log.
pub fn print_failure_statistics(stats: &FailureStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }
    info!("Failure Counts ({} total):", total);
    for kind in FailureKind::iter() {
        let count = stats.get(kind);
        if count > 0 {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}

/// One-line summary of a run.
pub fn summary_line(report: &RunReport) -> String {
    format!(
        "Processed {} target{} ({} succeeded, {} failed, {} record{}) in {:.1}s",
        report.total_targets,
        if report.total_targets == 1 { "" } else { "s" },
        report.succeeded,
        report.failed,
        report.records_emitted,
        if report.records_emitted == 1 { "" } else { "s" },
        report.elapsed_seconds
    )
}
