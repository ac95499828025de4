//! In-memory fakes of the collector seams, shared by the unit tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use collector_core::{
    ArticleReference, ArticleStore, AssetCatalog, AssetListing, CatalogError, ContentFetcher,
    EnrichedArticle, Entity, FetchError, NewsSource, RateSource, SentimentScore, SentimentScorer,
    StoreError, UpsertOutcome,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn published() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn reference(url: &str, entity: Option<&str>) -> ArticleReference {
    ArticleReference {
        url: url.to_string(),
        published_at: published(),
        title: format!("Title of {}", url),
        source_id: "coindesk".to_string(),
        description: None,
        entity: entity.map(str::to_string),
    }
}

/// Decrements `counter` if it is positive; true when it was.
fn take(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<(String, String), EnrichedArticle>>,
    upsert_calls: AtomicUsize,
    upserts_before_failure: AtomicUsize,
    failing_upserts: AtomicUsize,
    failing_exists: AtomicUsize,
}

impl MemoryStore {
    pub fn fail_next_upserts(&self, count: usize) {
        self.fail_upserts_after(0, count);
    }

    /// Let `ok` upserts through, then fail the following `count`.
    pub fn fail_upserts_after(&self, ok: usize, count: usize) {
        self.upserts_before_failure.store(ok, Ordering::SeqCst);
        self.failing_upserts.store(count, Ordering::SeqCst);
    }

    pub fn fail_next_exists(&self, count: usize) {
        self.failing_exists.store(count, Ordering::SeqCst);
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<EnrichedArticle> {
        self.records.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn exists(&self, url: &str, coin: Option<&str>) -> Result<bool, StoreError> {
        if take(&self.failing_exists) {
            return Err(StoreError::Read("connection reset".to_string()));
        }
        let key = (url.to_string(), coin.unwrap_or("").to_string());
        Ok(self.records.lock().unwrap().contains_key(&key))
    }

    async fn upsert(&self, article: &EnrichedArticle) -> Result<UpsertOutcome, StoreError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if !take(&self.upserts_before_failure) && take(&self.failing_upserts) {
            return Err(StoreError::Write("disk full".to_string()));
        }

        let key = (article.url.clone(), article.coin.clone().unwrap_or_default());
        let previous = self.records.lock().unwrap().insert(key, article.clone());
        Ok(if previous.is_some() {
            UpsertOutcome::Replaced
        } else {
            UpsertOutcome::Inserted
        })
    }
}

/// Serves fixed page texts; unknown URLs fail with a 404.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn with_pages(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, text)| (url.to_string(), text.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

pub struct FixedScorer(pub SentimentScore);

impl SentimentScorer for FixedScorer {
    fn score(&self, _text: &str) -> SentimentScore {
        self.0
    }
}

/// Catalog, news listing and price provider in one.
#[derive(Default)]
pub struct FakeMarket {
    pub listings: Vec<AssetListing>,
    pub catalog_unavailable: bool,
    /// Articles per entity symbol; `None` keys the global listing.
    pub articles: HashMap<Option<String>, Vec<ArticleReference>>,
    /// Current and past price per symbol; missing symbols fail.
    pub prices: HashMap<String, (f64, f64)>,
    pub listing_calls: Mutex<Vec<Option<String>>>,
    pub price_calls: Mutex<Vec<String>>,
}

impl FakeMarket {
    pub fn with_assets(assets: &[(&str, &str)]) -> Self {
        Self {
            listings: assets
                .iter()
                .map(|(name, symbol)| AssetListing {
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    percent_change_7d: None,
                })
                .collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AssetCatalog for FakeMarket {
    async fn list_top_assets(&self, limit: usize) -> Result<Vec<AssetListing>, CatalogError> {
        if self.catalog_unavailable {
            return Err(CatalogError::ApiError("catalog unavailable".to_string()));
        }
        Ok(self.listings.iter().take(limit).cloned().collect())
    }
}

#[async_trait]
impl NewsSource for FakeMarket {
    async fn list_recent_articles(
        &self,
        entity: Option<&Entity>,
    ) -> Result<Vec<ArticleReference>, CatalogError> {
        let key = entity.map(|e| e.symbol.clone());
        self.listing_calls.lock().unwrap().push(key.clone());
        Ok(self.articles.get(&key).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl RateSource for FakeMarket {
    async fn current_price(&self, entity: &Entity) -> Result<f64, CatalogError> {
        self.price_calls.lock().unwrap().push(entity.symbol.clone());
        self.prices
            .get(&entity.symbol)
            .map(|(current, _)| *current)
            .ok_or_else(|| CatalogError::InvalidData(format!("no price for {}", entity.symbol)))
    }

    async fn historical_price(
        &self,
        entity: &Entity,
        _at: DateTime<Utc>,
    ) -> Result<f64, CatalogError> {
        self.prices
            .get(&entity.symbol)
            .map(|(_, past)| *past)
            .ok_or_else(|| CatalogError::InvalidData(format!("no price for {}", entity.symbol)))
    }
}
