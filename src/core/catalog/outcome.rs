//! Outcome of a single price update

use crate::utils::error::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one price update attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_code: Option<String>,
    pub amount_minor_units: u64,
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<Value>,
}

impl OperationOutcome {
    pub fn success(item_id: impl Into<String>, amount_minor_units: u64, http_status: u16) -> Self {
        Self {
            item_id: item_id.into(),
            reference_code: None,
            amount_minor_units,
            succeeded: true,
            http_status: Some(http_status),
            error_detail: None,
        }
    }

    pub fn failure(
        item_id: impl Into<String>,
        amount_minor_units: u64,
        http_status: Option<u16>,
        error_detail: Value,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            reference_code: None,
            amount_minor_units,
            succeeded: false,
            http_status,
            error_detail: Some(error_detail),
        }
    }

    pub fn from_error(item_id: impl Into<String>, amount_minor_units: u64, error: &CatalogError) -> Self {
        Self::failure(item_id, amount_minor_units, error.status(), error.detail())
    }

    pub fn with_reference_code(mut self, reference_code: impl Into<String>) -> Self {
        self.reference_code = Some(reference_code.into());
        self
    }

    /// Error detail rendered on one line
    pub fn error_text(&self) -> String {
        match &self.error_detail {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
