//! Error types for the synchronizer

#![allow(missing_docs)]

mod catalog;
mod helpers;
mod types;

pub use catalog::CatalogError;
pub use types::{Result, SyncError};
