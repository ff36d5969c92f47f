//! Emits the aggregated violation report.

use tracing::{info, warn};

use crate::models::ViolationReport;

/// Logs the report as one consolidated block of warnings.
///
/// An empty report logs nothing above `info` level.
pub fn emit_report(report: &ViolationReport) {
    if report.is_empty() {
        info!("No warnings found");
        return;
    }

    warn!(users = report.len(), "Warnings found:");
    for line in report.lines() {
        warn!("{}", line);
    }
}
