//! Configuration loading from environment variables

use super::settings::{PriceUnits, PricingMode, SyncConfig};
use super::{DEFAULT_CSV_FILE_PATH, DEFAULT_RATE_LIMIT, default_base_url};
use crate::utils::error::{Result, SyncError};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable names
pub mod env_keys {
    pub const ACCOUNT_NAME: &str = "VTEX_ACCOUNT_NAME";
    pub const APP_KEY: &str = "VTEX_APP_KEY";
    pub const APP_TOKEN: &str = "VTEX_APP_TOKEN";
    pub const CSV_FILE_PATH: &str = "CSV_FILE_PATH";
    pub const RATE_LIMIT: &str = "RATE_LIMIT";
    pub const PRICING_MODE: &str = "PRICING_MODE";
    pub const PRICE_UNITS: &str = "PRICE_UNITS";
    pub const MIRROR_COST_PRICE: &str = "MIRROR_COST_PRICE";
    pub const CATALOG_BASE_URL: &str = "VTEX_CATALOG_BASE_URL";
    pub const PRICING_BASE_URL: &str = "VTEX_PRICING_BASE_URL";
}

impl SyncConfig {
    /// Load configuration from the process environment
    ///
    /// The result is not validated yet; the orchestrator validates it.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from environment variables");

        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let account_name = get(env_keys::ACCOUNT_NAME).unwrap_or_default();

        let rate_limit = match get(env_keys::RATE_LIMIT) {
            None => DEFAULT_RATE_LIMIT,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(
                        "Invalid {} value '{}', using default of {}",
                        env_keys::RATE_LIMIT,
                        raw,
                        DEFAULT_RATE_LIMIT
                    );
                    DEFAULT_RATE_LIMIT
                }
            },
        };

        let mode = get(env_keys::PRICING_MODE)
            .map(|raw| raw.parse::<PricingMode>())
            .transpose()
            .map_err(SyncError::Config)?
            .unwrap_or_default();

        let units = get(env_keys::PRICE_UNITS)
            .map(|raw| raw.parse::<PriceUnits>())
            .transpose()
            .map_err(SyncError::Config)?
            .unwrap_or_default();

        let mirror_cost_price = get(env_keys::MIRROR_COST_PRICE)
            .map(|raw| parse_bool(&raw))
            .transpose()
            .map_err(SyncError::Config)?
            .unwrap_or(false);

        let catalog_base_url =
            get(env_keys::CATALOG_BASE_URL).unwrap_or_else(|| default_base_url(&account_name));
        let pricing_base_url =
            get(env_keys::PRICING_BASE_URL).unwrap_or_else(|| catalog_base_url.clone());

        let config = Self {
            app_key: get(env_keys::APP_KEY).unwrap_or_default(),
            app_token: get(env_keys::APP_TOKEN).unwrap_or_default(),
            csv_file_path: PathBuf::from(
                get(env_keys::CSV_FILE_PATH).unwrap_or_else(|| DEFAULT_CSV_FILE_PATH.to_string()),
            ),
            account_name,
            rate_limit,
            mode,
            units,
            mirror_cost_price,
            catalog_base_url,
            pricing_base_url,
        };

        debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }
}

fn parse_bool(raw: &str) -> std::result::Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!(
            "Invalid {} value '{}', expected true or false",
            env_keys::MIRROR_COST_PRICE,
            other
        )),
    }
}
