//! HTTP client for the catalog and pricing APIs

use super::types::{LookupResponse, PriceUpdateRequest};
use crate::config::SyncConfig;
use crate::utils::error::{CatalogError, Result, SyncError};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Credential header carrying the app key
pub const APP_KEY_HEADER: &str = "X-VTEX-API-AppKey";
/// Credential header carrying the app token
pub const APP_TOKEN_HEADER: &str = "X-VTEX-API-AppToken";

/// Deadline applied to every remote call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("catalog-price-sync/", env!("CARGO_PKG_VERSION"));

/// Settings for `CatalogClient`
#[derive(Clone)]
pub struct CatalogClientConfig {
    pub catalog_base_url: String,
    pub pricing_base_url: String,
    pub app_key: String,
    pub app_token: String,
    pub timeout: Duration,
    pub mirror_cost_price: bool,
}

impl CatalogClientConfig {
    pub fn from_sync_config(config: &SyncConfig) -> Self {
        Self {
            catalog_base_url: config.catalog_base_url.clone(),
            pricing_base_url: config.pricing_base_url.clone(),
            app_key: config.app_key.clone(),
            app_token: config.app_token.clone(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            mirror_cost_price: config.mirror_cost_price,
        }
    }

    /// Both APIs behind a single base URL
    pub fn single_endpoint(
        base_url: impl Into<String>,
        app_key: impl Into<String>,
        app_token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            catalog_base_url: base_url.clone(),
            pricing_base_url: base_url,
            app_key: app_key.into(),
            app_token: app_token.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            mirror_cost_price: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_mirror_cost_price(mut self, mirror: bool) -> Self {
        self.mirror_cost_price = mirror;
        self
    }
}

/// Client for one catalog account
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    catalog_base: Url,
    pricing_base: Url,
    timeout: Duration,
    mirror_cost_price: bool,
}

impl CatalogClient {
    /// Build a client; fails on unusable URLs or credentials
    pub fn new(config: CatalogClientConfig) -> Result<Self> {
        let catalog_base = parse_base_url("catalog", &config.catalog_base_url)?;
        let pricing_base = parse_base_url("pricing", &config.pricing_base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header_name(APP_KEY_HEADER)?,
            credential_header("app key", &config.app_key)?,
        );
        headers.insert(
            header_name(APP_TOKEN_HEADER)?,
            credential_header("app token", &config.app_token)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            catalog_base,
            pricing_base,
            timeout: config.timeout,
            mirror_cost_price: config.mirror_cost_price,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{catalog}/catalog_system/pvt/sku/stockkeepingunitbyrefid`
    pub fn lookup_url(&self) -> std::result::Result<Url, CatalogError> {
        join_segments(
            &self.catalog_base,
            &["catalog_system", "pvt", "sku", "stockkeepingunitbyrefid"],
        )
    }

    /// `{pricing}/pricing/prices/{item_id}`, with the id percent-encoded
    pub fn pricing_url(&self, item_id: &str) -> std::result::Result<Url, CatalogError> {
        join_segments(&self.pricing_base, &["pricing", "prices", item_id])
    }

    /// Look up the internal id of the first SKU matching `reference_code`
    ///
    /// An empty result and a 404 both mean "no match".
    pub async fn lookup_item_id(
        &self,
        reference_code: &str,
    ) -> std::result::Result<Option<String>, CatalogError> {
        let url = self.lookup_url()?;
        debug!(reference_code, "Looking up SKU by reference code");

        let response = self
            .http
            .get(url)
            .query(&[("refId", reference_code)])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = self.ensure_success(response).await?;

        let body = response.text().await.map_err(|e| self.map_transport_error(e))?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        let parsed: LookupResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(parsed.first_id())
    }

    /// Replace the base price of one item; returns the response status
    pub async fn put_price(
        &self,
        item_id: &str,
        amount_minor_units: u64,
    ) -> std::result::Result<u16, CatalogError> {
        let url = self.pricing_url(item_id)?;
        let body = PriceUpdateRequest::base_price(item_id, amount_minor_units, self.mirror_cost_price);
        debug!(item_id, amount_minor_units, "Sending price update");

        let response = self
            .http
            .put(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = self.ensure_success(response).await?;
        Ok(response.status().as_u16())
    }

    async fn ensure_success(&self, response: Response) -> std::result::Result<Response, CatalogError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CatalogError::api(status.as_u16(), &body))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout(self.timeout)
        } else {
            CatalogError::from(err)
        }
    }
}

fn parse_base_url(name: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| SyncError::config(format!("Invalid {} base URL '{}': {}", name, value, e)))?;
    if url.cannot_be_a_base() {
        return Err(SyncError::config(format!(
            "Invalid {} base URL '{}': not a base URL",
            name, value
        )));
    }
    Ok(url)
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| SyncError::internal(format!("Invalid header name '{}': {}", name, e)))
}

fn credential_header(name: &str, value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| SyncError::config(format!("Invalid {}: {}", name, e)))?;
    header.set_sensitive(true);
    Ok(header)
}

fn join_segments(base: &Url, segments: &[&str]) -> std::result::Result<Url, CatalogError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| CatalogError::Transport(format!("cannot extend base URL {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
