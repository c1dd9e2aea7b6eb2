//! Configuration management for the synchronizer
//!
//! Settings come from the process environment (optionally seeded from a
//! `.env` file) and may be overridden from the command line. Validation runs
//! before any record is read or any remote call is made.

mod loader;
mod settings;
mod validate;


pub use loader::env_keys;
pub use settings::{PriceUnits, PricingMode, SyncConfig};
pub use validate::Validate;

/// Input path used when `CSV_FILE_PATH` is unset
pub const DEFAULT_CSV_FILE_PATH: &str = "./data.csv";

/// Concurrency cap used when `RATE_LIMIT` is unset or invalid
pub const DEFAULT_RATE_LIMIT: usize = 2;

/// Catalog API base for an account
pub fn default_base_url(account_name: &str) -> String {
    format!("https://{}.vtexcommercestable.com.br/api", account_name)
}
