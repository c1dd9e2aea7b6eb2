//! Human-readable and persisted forms of a report

use super::types::BatchReport;
use crate::core::pricing::format_minor_units;
use crate::utils::error::Result;
use std::path::Path;
use tracing::{info, warn};

/// Summary block printed at the end of a run
pub fn summary_lines(report: &BatchReport) -> Vec<String> {
    let mut lines = vec![
        "=== Price update summary ===".to_string(),
        format!("Successful: {}", report.success_count),
        format!("Failed: {}", report.failure_count),
    ];
    if report.skipped_rows > 0 {
        lines.push(format!("Skipped rows: {}", report.skipped_rows));
    }
    if !report.unresolved.is_empty() {
        lines.push(format!("Unresolved reference codes: {}", report.unresolved.len()));
    }

    if !report.failures.is_empty() {
        lines.push("Failed products:".to_string());
        for failure in &report.failures {
            let status = failure
                .http_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "no response".to_string());
            lines.push(format!(
                "  {} ({}) [{}]: {}",
                failure.item_id,
                format_minor_units(failure.amount_minor_units),
                status,
                failure.error_text()
            ));
        }
    }
    for entry in &report.unresolved {
        lines.push(format!("  {} not resolved: {}", entry.reference_code, entry.reason));
    }

    lines
}

pub fn log_summary(report: &BatchReport) {
    let lines = summary_lines(report);
    if report.is_clean() {
        for line in &lines {
            info!("{}", line);
        }
    } else {
        for line in &lines {
            warn!("{}", line);
        }
    }
    info!(
        run_id = %report.run_id,
        elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
        "Price update run finished"
    );
}

/// Write the report as pretty-printed JSON
pub fn write_report_json(report: &BatchReport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let body = serde_json::to_string_pretty(report)?;
    std::fs::write(path, body)?;
    info!("Report written to {}", path.display());
    Ok(())
}
