use crate::transport::HttpTransport;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use collector_core::{ArticleReference, CatalogError, Entity, NewsSource, RateSource};
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://min-api.cryptocompare.com";

/// News listings and prices from CryptoCompare
#[derive(Clone)]
pub struct CryptoCompareClient {
    api_key: Option<String>,
    base_url: String,
    quote_currency: String,
    transport: HttpTransport,
}

impl CryptoCompareClient {
    pub fn new(api_key: Option<String>, quote_currency: &str, transport: HttpTransport) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, quote_currency, transport)
    }

    pub fn with_base_url(
        api_key: Option<String>,
        base_url: &str,
        quote_currency: &str,
        transport: HttpTransport,
    ) -> Self {
        if api_key.is_none() {
            tracing::warn!("No CryptoCompare API key configured, requests are unauthenticated");
        }
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            quote_currency: quote_currency.to_uppercase(),
            transport,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.transport.client().get(format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => request.header("authorization", format!("Apikey {}", key)),
            None => request,
        }
    }

    /// English news list, optionally restricted to one asset category.
    pub async fn news_list(&self, entity: Option<&Entity>) -> Result<Vec<ArticleReference>, CatalogError> {
        let mut query = vec![("lang", "EN".to_string())];
        if let Some(entity) = entity {
            query.push(("categories", entity.symbol.to_uppercase()));
        }

        let body: Value = self
            .transport
            .get_json(self.get("/data/v2/news/").query(&query))
            .await?;
        check_error(&body)?;

        let items: Vec<NewsItem> = serde_json::from_value(body.get("Data").cloned().unwrap_or(Value::Null))
            .map_err(|e| CatalogError::InvalidData(format!("news list: {}", e)))?;

        let scope = entity.map(|e| e.symbol.clone());
        let articles: Vec<ArticleReference> = items
            .into_iter()
            .filter_map(|item| {
                let Some(published_at) = DateTime::<Utc>::from_timestamp(item.published_on, 0) else {
                    tracing::warn!("Dropping article with invalid timestamp: {}", item.url);
                    return None;
                };
                Some(ArticleReference {
                    url: item.url,
                    published_at,
                    title: item.title,
                    source_id: item.source,
                    description: item.body.filter(|b| !b.is_empty()),
                    entity: scope.clone(),
                })
            })
            .collect();

        tracing::info!("Loading article metadata - {} found", articles.len());
        Ok(articles)
    }

    /// Latest price of `symbol` in the quote currency.
    pub async fn price(&self, symbol: &str) -> Result<f64, CatalogError> {
        let symbol = symbol.to_uppercase();
        let body: Value = self
            .transport
            .get_json(
                self.get("/data/price")
                    .query(&[("fsym", symbol.as_str()), ("tsyms", self.quote_currency.as_str())]),
            )
            .await?;
        check_error(&body)?;

        body.get(&self.quote_currency)
            .and_then(Value::as_f64)
            .ok_or_else(|| CatalogError::InvalidData(format!("no {} price for {}", self.quote_currency, symbol)))
    }

    /// Price of `symbol` as of `at`.
    pub async fn price_at(&self, symbol: &str, at: DateTime<Utc>) -> Result<f64, CatalogError> {
        let symbol = symbol.to_uppercase();
        let body: Value = self
            .transport
            .get_json(self.get("/data/pricehistorical").query(&[
                ("fsym", symbol.clone()),
                ("tsyms", self.quote_currency.clone()),
                ("ts", at.timestamp().to_string()),
            ]))
            .await?;
        check_error(&body)?;

        body.get(&symbol)
            .and_then(|quotes| quotes.get(&self.quote_currency))
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                CatalogError::InvalidData(format!("no historical {} price for {}", self.quote_currency, symbol))
            })
    }
}

/// CryptoCompare reports failures as HTTP 200 with `"Response": "Error"`.
fn check_error(body: &Value) -> Result<(), CatalogError> {
    if body.get("Response").and_then(Value::as_str) == Some("Error") {
        let message = body
            .get("Message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(CatalogError::ApiError(format!("CryptoCompare: {}", message)));
    }
    Ok(())
}

#[async_trait]
impl NewsSource for CryptoCompareClient {
    async fn list_recent_articles(
        &self,
        entity: Option<&Entity>,
    ) -> Result<Vec<ArticleReference>, CatalogError> {
        self.news_list(entity).await
    }
}

#[async_trait]
impl RateSource for CryptoCompareClient {
    async fn current_price(&self, entity: &Entity) -> Result<f64, CatalogError> {
        self.price(&entity.symbol).await
    }

    async fn historical_price(&self, entity: &Entity, at: DateTime<Utc>) -> Result<f64, CatalogError> {
        self.price_at(&entity.symbol, at).await
    }
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    url: String,
    published_on: i64,
    title: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    body: Option<String>,
}
