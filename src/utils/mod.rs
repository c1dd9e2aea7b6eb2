//! Utility modules for the price synchronizer
//!
//! - **error**: Error types shared by the pipeline stages
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
