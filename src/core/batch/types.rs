//! Batch data types

use crate::core::catalog::OperationOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row that produced a valid amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUpdate {
    pub reference_code: String,
    pub amount_minor_units: u64,
}

/// Update whose target item is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUpdate {
    pub item_id: String,
    pub reference_code: String,
    pub amount_minor_units: u64,
}

impl ResolvedUpdate {
    /// In direct mode the input identifier already is the item id
    pub fn direct(update: ParsedUpdate) -> Self {
        Self {
            item_id: update.reference_code.clone(),
            reference_code: update.reference_code,
            amount_minor_units: update.amount_minor_units,
        }
    }

    pub fn resolved(update: ParsedUpdate, item_id: String) -> Self {
        Self {
            item_id,
            reference_code: update.reference_code,
            amount_minor_units: update.amount_minor_units,
        }
    }
}

/// Reference code that could not be mapped to an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedReference {
    pub reference_code: String,
    pub amount_minor_units: u64,
    pub reason: String,
}

impl UnresolvedReference {
    pub fn not_found(update: &ParsedUpdate) -> Self {
        Self {
            reference_code: update.reference_code.clone(),
            amount_minor_units: update.amount_minor_units,
            reason: "no catalog item matches the reference code".to_string(),
        }
    }

    pub fn with_reason(update: &ParsedUpdate, reason: impl Into<String>) -> Self {
        Self {
            reference_code: update.reference_code.clone(),
            amount_minor_units: update.amount_minor_units,
            reason: reason.into(),
        }
    }
}

/// Final result of a run
///
/// `success_count + failure_count` is the number of price updates attempted.
/// Skipped rows and unresolved references are reported separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub success_count: usize,
    pub failure_count: usize,
    /// Failed updates, in settlement order
    pub failures: Vec<OperationOutcome>,
    pub unresolved: Vec<UnresolvedReference>,
    /// Rows dropped because the identifier or price was unusable
    pub skipped_rows: usize,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// No failed update and no unresolved reference
    pub fn is_clean(&self) -> bool {
        self.failure_count == 0 && self.unresolved.is_empty()
    }
}
