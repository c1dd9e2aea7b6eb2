//! Configuration validators

use super::settings::SyncConfig;
use tracing::debug;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating synchronizer configuration");

        let required = [
            ("account name", &self.account_name),
            ("app key", &self.app_key),
            ("app token", &self.app_token),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(format!(
                "Missing required settings: {}. Check your .env file.",
                missing.join(", ")
            ));
        }

        if self.rate_limit == 0 {
            return Err("Rate limit must be greater than 0".to_string());
        }

        if self.csv_file_path.as_os_str().is_empty() {
            return Err("CSV file path cannot be empty".to_string());
        }

        validate_base_url("catalog base URL", &self.catalog_base_url)?;
        validate_base_url("pricing base URL", &self.pricing_base_url)?;

        Ok(())
    }
}

fn validate_base_url(name: &str, value: &str) -> Result<(), String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("Invalid {} '{}': {}", name, value, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!(
            "Invalid {} '{}': unsupported scheme '{}'",
            name, value, scheme
        )),
    }
}
