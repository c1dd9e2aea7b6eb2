//! Reference code resolution

use super::client::CatalogClient;
use crate::utils::error::CatalogError;
use async_trait::async_trait;
use tracing::debug;

/// Maps a human-facing reference code to the catalog's internal item id
#[async_trait]
pub trait IdentifierResolver: Send + Sync {
    /// `Ok(None)` when nothing matches; `Err` when the lookup itself failed
    ///
    /// Callers treat both as "unresolved" but report them differently.
    async fn resolve(&self, reference_code: &str) -> Result<Option<String>, CatalogError>;
}

#[async_trait]
impl IdentifierResolver for CatalogClient {
    async fn resolve(&self, reference_code: &str) -> Result<Option<String>, CatalogError> {
        let resolved = self.lookup_item_id(reference_code).await?;
        match &resolved {
            Some(item_id) => debug!(reference_code, item_id = %item_id, "Resolved reference code"),
            None => debug!(reference_code, "No SKU matches reference code"),
        }
        Ok(resolved)
    }
}
