//! Integration tests for catalog-price-sync
//!
//! These tests run the real HTTP client and pipeline against a local mock
//! catalog server.

pub mod sync_run_tests;
