//! Price mutation

use super::client::CatalogClient;
use super::outcome::OperationOutcome;
use async_trait::async_trait;

/// Applies one price update to the catalog
#[async_trait]
pub trait PriceMutator: Send + Sync {
    /// Never fails: transport and remote errors come back as a failed outcome
    async fn update_price(&self, item_id: &str, amount_minor_units: u64) -> OperationOutcome;
}

#[async_trait]
impl PriceMutator for CatalogClient {
    async fn update_price(&self, item_id: &str, amount_minor_units: u64) -> OperationOutcome {
        match self.put_price(item_id, amount_minor_units).await {
            Ok(status) => OperationOutcome::success(item_id, amount_minor_units, status),
            Err(e) => OperationOutcome::from_error(item_id, amount_minor_units, &e),
        }
    }
}
