use crate::transport::HttpTransport;
use async_trait::async_trait;
use collector_core::{AssetCatalog, AssetListing, CatalogError};
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// Asset catalog backed by the CoinMarketCap listings endpoint
#[derive(Clone)]
pub struct CoinMarketCapClient {
    api_key: Option<String>,
    base_url: String,
    transport: HttpTransport,
}

impl CoinMarketCapClient {
    pub fn new(api_key: Option<String>, transport: HttpTransport) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, transport)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: &str, transport: HttpTransport) -> Self {
        if api_key.is_none() {
            tracing::warn!("No CoinMarketCap API key configured, requests are unauthenticated");
        }
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Top `limit` assets by market cap, in provider order.
    pub async fn listings(&self, limit: usize) -> Result<Vec<AssetListing>, CatalogError> {
        let url = format!("{}/v1/cryptocurrency/listings/latest", self.base_url);

        let mut request = self
            .transport
            .client()
            .get(&url)
            .query(&[("limit", limit.to_string()), ("convert", "USD".to_string())]);
        if let Some(key) = &self.api_key {
            request = request.header("X-CMC_PRO_API_KEY", key);
        }

        let listing: ListingResponse = self.transport.get_json(request).await?;

        if let Some(status) = &listing.status {
            if status.error_code != 0 {
                return Err(CatalogError::ApiError(format!(
                    "CoinMarketCap error {}: {}",
                    status.error_code,
                    status.error_message.clone().unwrap_or_default()
                )));
            }
        }

        let assets: Vec<AssetListing> = listing
            .data
            .into_iter()
            .map(|item| AssetListing {
                percent_change_7d: item.quote.get("USD").and_then(|q| q.percent_change_7d),
                name: item.name,
                symbol: item.symbol,
            })
            .collect();

        tracing::info!("Loaded {} assets from CoinMarketCap", assets.len());
        Ok(assets)
    }
}

#[async_trait]
impl AssetCatalog for CoinMarketCapClient {
    async fn list_top_assets(&self, limit: usize) -> Result<Vec<AssetListing>, CatalogError> {
        self.listings(limit).await
    }
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    status: Option<ListingStatus>,
    #[serde(default)]
    data: Vec<ListingItem>,
}

#[derive(Debug, Deserialize)]
struct ListingStatus {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingItem {
    name: String,
    symbol: String,
    #[serde(default)]
    quote: HashMap<String, ListingQuote>,
}

#[derive(Debug, Deserialize)]
struct ListingQuote {
    #[serde(default)]
    percent_change_7d: Option<f64>,
}
