//! Remote catalog access
//!
//! Two endpoints are used: a SKU lookup by reference code, and the pricing
//! endpoint that replaces the price of one item. Both are reached through
//! `CatalogClient`; the pipeline only sees the `IdentifierResolver` and
//! `PriceMutator` traits so that tests can stand in for the network.

mod client;
mod mutator;
mod outcome;
mod resolver;
mod types;

pub use client::{
    APP_KEY_HEADER, APP_TOKEN_HEADER, CatalogClient, CatalogClientConfig, DEFAULT_REQUEST_TIMEOUT,
};
pub use mutator::PriceMutator;
pub use outcome::OperationOutcome;
pub use resolver::IdentifierResolver;
pub use types::{FixedPrice, LookupResponse, PriceUpdateRequest, SkuId, SkuLookupEntry};
