//! JSONBin HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::JsonBinConfig;

use super::JsonBinError;
use super::conversions::normalize_products;
use super::types::{BinResponse, PaymentInfo, Product, RawProductRecord};

/// JSONBin v3 bin endpoint.
const BASE_URL: &str = "https://api.jsonbin.io/v3/b";

/// How long a fetched catalog is reused before refetching.
const CATALOG_TTL: Duration = Duration::from_secs(60);

/// Cache key for the (single) catalog entry.
const CATALOG_CACHE_KEY: &str = "catalog";

/// Client for the JSONBin document store.
///
/// Reads the catalog bin and the payment bin. Catalog reads within the TTL
/// window share one fetch; payment details are always fetched fresh.
#[derive(Clone)]
pub struct JsonBinClient {
    inner: Arc<JsonBinClientInner>,
}

struct JsonBinClientInner {
    client: reqwest::Client,
    catalog_bin_id: String,
    payment_bin_id: String,
    catalog_cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl JsonBinClient {
    /// Create a new document-store client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &JsonBinConfig) -> Result<Self, JsonBinError> {
        let mut headers = HeaderMap::new();

        let mut master_key = HeaderValue::from_str(config.master_key.expose_secret())
            .map_err(|e| JsonBinError::Malformed(format!("invalid master key format: {e}")))?;
        master_key.set_sensitive(true);
        headers.insert("X-Master-Key", master_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let catalog_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CATALOG_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(JsonBinClientInner {
                client,
                catalog_bin_id: config.catalog_bin_id.clone(),
                payment_bin_id: config.payment_bin_id.clone(),
                catalog_cache,
            }),
        })
    }

    /// Fetch a bin and deserialize its `record` payload.
    async fn fetch_bin<T: DeserializeOwned>(&self, bin_id: &str) -> Result<T, JsonBinError> {
        let url = format!("{BASE_URL}/{bin_id}");

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "JSONBin returned non-success status"
            );
            return Err(JsonBinError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        let envelope: BinResponse<T> = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse JSONBin response"
            );
            JsonBinError::Parse(e)
        })?;

        Ok(envelope.record)
    }

    /// Get the normalized product catalog.
    ///
    /// Served from the in-process cache when a fetch resolved within the
    /// last minute; otherwise fetched and normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or parse fails. Errors are never
    /// cached, so the next call retries.
    #[instrument(skip(self))]
    pub async fn get_catalog(&self) -> Result<Arc<Vec<Product>>, JsonBinError> {
        if let Some(products) = self.inner.catalog_cache.get(CATALOG_CACHE_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let records: Vec<RawProductRecord> = self.fetch_bin(&self.inner.catalog_bin_id).await?;
        let products = Arc::new(normalize_products(records));

        self.inner
            .catalog_cache
            .insert(CATALOG_CACHE_KEY, Arc::clone(&products))
            .await;

        Ok(products)
    }

    /// Get the payment details (bank transfer + BTC address).
    ///
    /// Always fetched fresh; the checkout renders whatever is current.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or parse fails, or if the payment bin
    /// record is empty.
    #[instrument(skip(self))]
    pub async fn get_payment_info(&self) -> Result<PaymentInfo, JsonBinError> {
        let records: Vec<PaymentInfo> = self.fetch_bin(&self.inner.payment_bin_id).await?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| JsonBinError::Malformed("payment record is empty".to_string()))
    }
}
