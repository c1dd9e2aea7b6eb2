//! Error handling utilities
//!
//! Fatal errors (`SyncError`) end the process with a non-zero status.
//! Per-item errors (`CatalogError`) are folded into the report.

pub mod error;

pub use error::*;
