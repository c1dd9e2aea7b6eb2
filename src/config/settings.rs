//! Configuration models

use super::{DEFAULT_CSV_FILE_PATH, DEFAULT_RATE_LIMIT, Validate};
use crate::utils::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where the internal item identifier comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// The input already carries the catalog item id
    #[default]
    Direct,
    /// The input carries a reference code that must be looked up first
    ReferenceLookup,
}

impl FromStr for PricingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "direct" => Ok(Self::Direct),
            "reference_lookup" | "lookup" | "refid" => Ok(Self::ReferenceLookup),
            other => Err(format!(
                "unknown pricing mode '{}', expected direct or reference_lookup",
                other
            )),
        }
    }
}

/// How price text is turned into an amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnits {
    /// Decimal major units, converted to minor units with rounding
    #[default]
    MinorUnitRounded,
    /// Separators dropped and the digits read as one integer
    MajorUnitInteger,
}

impl FromStr for PriceUnits {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "minor_unit_rounded" | "minor" | "cents" => Ok(Self::MinorUnitRounded),
            "major_unit_integer" | "major" | "integer" => Ok(Self::MajorUnitInteger),
            other => Err(format!(
                "unknown price units '{}', expected minor_unit_rounded or major_unit_integer",
                other
            )),
        }
    }
}

/// Complete configuration of one synchronization run
#[derive(Clone)]
pub struct SyncConfig {
    /// Tenant account on the catalog platform
    pub account_name: String,
    /// Static credential sent as `X-VTEX-API-AppKey`
    pub app_key: String,
    /// Static credential sent as `X-VTEX-API-AppToken`
    pub app_token: String,
    /// Path to the delimited input file
    pub csv_file_path: PathBuf,
    /// Maximum number of in-flight remote calls
    pub rate_limit: usize,
    /// Identifier mode
    pub mode: PricingMode,
    /// Price parsing policy
    pub units: PriceUnits,
    /// Copy the base price into the cost price field
    pub mirror_cost_price: bool,
    /// Base URL of the catalog lookup API
    pub catalog_base_url: String,
    /// Base URL of the pricing API
    pub pricing_base_url: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            account_name: String::new(),
            app_key: String::new(),
            app_token: String::new(),
            csv_file_path: PathBuf::from(DEFAULT_CSV_FILE_PATH),
            rate_limit: DEFAULT_RATE_LIMIT,
            mode: PricingMode::default(),
            units: PriceUnits::default(),
            mirror_cost_price: false,
            catalog_base_url: String::new(),
            pricing_base_url: String::new(),
        }
    }
}

// Credentials never reach the logs.
impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("account_name", &self.account_name)
            .field("app_key", &redact(&self.app_key))
            .field("app_token", &redact(&self.app_token))
            .field("csv_file_path", &self.csv_file_path)
            .field("rate_limit", &self.rate_limit)
            .field("mode", &self.mode)
            .field("units", &self.units)
            .field("mirror_cost_price", &self.mirror_cost_price)
            .field("catalog_base_url", &self.catalog_base_url)
            .field("pricing_base_url", &self.pricing_base_url)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() { "<unset>" } else { "[REDACTED]" }
}

impl SyncConfig {
    /// Validate the entire configuration
    pub fn check(&self) -> Result<()> {
        Validate::validate(self).map_err(SyncError::Config)
    }
}
