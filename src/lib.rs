//! # catalog-price-sync
//!
//! Bulk price synchronization for e-commerce catalogs. Rows of
//! `(identifier, price text)` are read from a delimited file, parsed into
//! integer minor units, optionally resolved from reference codes to catalog
//! item ids and pushed to the pricing API with at most N requests in flight.
//!
//! ## Features
//!
//! - **Two identifier modes**: direct item ids or reference-code lookup
//! - **Exact money handling**: prices become integer minor units, never floats
//! - **Bounded fan-out**: a FIFO concurrency limiter caps in-flight requests
//! - **Failure isolation**: one failing item never stops the others
//! - **Structured report**: counts, failures and unresolved codes as JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog_price_sync::{BatchOrchestrator, SyncConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SyncConfig::from_env()?;
//!     let mut orchestrator = BatchOrchestrator::from_config(config)?;
//!     let report = orchestrator.run().await?;
//!
//!     println!("{} updated, {} failed", report.success_count, report.failure_count);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::{PriceUnits, PricingMode, SyncConfig};
pub use utils::error::{CatalogError, Result, SyncError};

// Export the pipeline
pub use core::batch::{
    BatchOptions, BatchOrchestrator, BatchPhase, BatchReport, OperationOutcome,
    UnresolvedReference, write_report_json,
};
pub use core::catalog::{CatalogClient, CatalogClientConfig, IdentifierResolver, PriceMutator};
pub use core::limiter::{ConcurrencyLimiter, LimiterClosed};
pub use core::pricing::{format_minor_units, parse_price};
pub use core::source::{CsvRecordSource, InMemorySource, RawRecord, RecordSource};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
