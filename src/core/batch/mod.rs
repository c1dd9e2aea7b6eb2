//! Batch price synchronization
//!
//! The orchestrator loads every row, optionally resolves reference codes,
//! fans the price updates out through the shared concurrency limiter and
//! waits for all of them before building the report.

mod aggregator;
mod orchestrator;
mod summary;
mod types;


pub use aggregator::ReportAggregator;
pub use orchestrator::{BatchOptions, BatchOrchestrator, BatchPhase, LoadedBatch};
pub use summary::{log_summary, summary_lines, write_report_json};
pub use types::{BatchReport, ParsedUpdate, ResolvedUpdate, UnresolvedReference};

// Re-exported so callers of the pipeline find every report type here
pub use crate::core::catalog::OperationOutcome;
