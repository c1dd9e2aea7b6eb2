//! Core functionality of the synchronizer
//!
//! This module contains the pipeline stages and the orchestrator that
//! drives them.

pub mod batch;
pub mod catalog;
pub mod limiter;
pub mod pricing;
pub mod source;
