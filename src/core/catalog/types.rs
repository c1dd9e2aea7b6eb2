//! Wire types for the catalog API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `PUT /pricing/prices/{itemId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdateRequest {
    pub item_id: String,
    /// Base price in minor units
    pub base_price: u64,
    pub cost_price: Option<u64>,
    pub markup: Option<f64>,
    pub fixed_prices: Vec<FixedPrice>,
}

impl PriceUpdateRequest {
    /// Replace the base price, clearing markup and fixed prices
    pub fn base_price(item_id: impl Into<String>, amount_minor_units: u64, mirror_cost_price: bool) -> Self {
        Self {
            item_id: item_id.into(),
            base_price: amount_minor_units,
            cost_price: mirror_cost_price.then_some(amount_minor_units),
            markup: None,
            fixed_prices: Vec::new(),
        }
    }
}

/// Per trade policy price override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedPrice {
    pub trade_policy_id: String,
    pub value: u64,
    pub list_price: Option<u64>,
    pub min_quantity: u32,
}

/// Internal SKU identifier; the API is not consistent about its JSON type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkuId {
    Number(u64),
    Text(String),
}

impl fmt::Display for SkuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One match of a reference code lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuLookupEntry {
    #[serde(rename = "Id", alias = "id", alias = "skuId")]
    pub id: SkuId,
    #[serde(rename = "RefId", alias = "refId", default)]
    pub ref_id: Option<String>,
}

/// Lookup responses come back as a list or, from older endpoints, a single object
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LookupResponse {
    Many(Vec<SkuLookupEntry>),
    One(SkuLookupEntry),
}

impl LookupResponse {
    /// First match, as ordered by the catalog
    pub fn first_id(&self) -> Option<String> {
        match self {
            Self::Many(entries) => entries.first().map(|e| e.id.to_string()),
            Self::One(entry) => Some(entry.id.to_string()),
        }
    }
}
