//! Mock catalog server
//!
//! Wraps a `wiremock::MockServer` with helpers for the two endpoints the
//! synchronizer talks to.

use catalog_price_sync::config::SyncConfig;
use catalog_price_sync::core::catalog::{
    APP_KEY_HEADER, APP_TOKEN_HEADER, CatalogClient, CatalogClientConfig,
};
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TEST_ACCOUNT: &str = "teststore";
pub const TEST_APP_KEY: &str = "vtexappkey-teststore-XYZ";
pub const TEST_APP_TOKEN: &str = "test-app-token";

pub const LOOKUP_PATH: &str = "/catalog_system/pvt/sku/stockkeepingunitbyrefid";

pub struct MockCatalog {
    pub server: MockServer,
}

impl MockCatalog {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client_config(&self) -> CatalogClientConfig {
        CatalogClientConfig::single_endpoint(self.uri(), TEST_APP_KEY, TEST_APP_TOKEN)
    }

    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(self.client_config()).expect("build client")
    }

    pub fn client_with_timeout(&self, timeout: Duration) -> CatalogClient {
        CatalogClient::new(self.client_config().with_timeout(timeout)).expect("build client")
    }

    /// Complete run configuration pointing at this server
    pub fn sync_config(&self, csv: &Path) -> SyncConfig {
        SyncConfig {
            account_name: TEST_ACCOUNT.to_string(),
            app_key: TEST_APP_KEY.to_string(),
            app_token: TEST_APP_TOKEN.to_string(),
            csv_file_path: csv.to_path_buf(),
            catalog_base_url: self.uri(),
            pricing_base_url: self.uri(),
            ..SyncConfig::default()
        }
    }

    /// Accept price updates for every item
    pub async fn accept_all_prices(&self) {
        Mock::given(method("PUT"))
            .and(path_regex(r"^/pricing/prices/[^/]+$"))
            .and(header(APP_KEY_HEADER, TEST_APP_KEY))
            .and(header(APP_TOKEN_HEADER, TEST_APP_TOKEN))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Reject the update of one item with `status` and a JSON payload
    pub async fn reject_price(&self, item_id: &str, status: u16, payload: Value) {
        Mock::given(method("PUT"))
            .and(path(format!("/pricing/prices/{}", item_id)))
            .respond_with(ResponseTemplate::new(status).set_body_json(payload))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Answer a reference code lookup with one SKU id
    pub async fn sku_for_reference(&self, reference_code: &str, sku_id: u64) {
        Mock::given(method("GET"))
            .and(path(LOOKUP_PATH))
            .and(query_param("refId", reference_code))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"Id": sku_id, "RefId": reference_code}
            ])))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Any other lookup returns an empty list
    pub async fn unknown_references_empty(&self) {
        Mock::given(method("GET"))
            .and(path(LOOKUP_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&self.server)
            .await;
    }

    /// Any other lookup fails with `status` and a JSON payload
    pub async fn failing_lookups(&self, status: u16, payload: Value) {
        Mock::given(method("GET"))
            .and(path(LOOKUP_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(payload))
            .mount(&self.server)
            .await;
    }

    pub async fn received(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Bodies of every price update received, in arrival order
    pub async fn price_bodies(&self) -> Vec<Value> {
        self.received()
            .await
            .into_iter()
            .filter(|r| r.method.as_str() == "PUT")
            .map(|r| serde_json::from_slice(&r.body).expect("json body"))
            .collect()
    }
}
