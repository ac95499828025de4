use async_trait::async_trait;
use crate::{
    ArticleReference, AssetListing, CatalogError, EnrichedArticle, Entity, FetchError,
    SentimentScore, StoreError, UpsertOutcome,
};

/// Idempotent persistence of enriched articles
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// True iff a record keyed by `(url, coin)` is already persisted.
    async fn exists(&self, url: &str, coin: Option<&str>) -> Result<bool, StoreError>;

    /// Insert or replace the record keyed by `(url, coin)`.
    async fn upsert(&self, article: &EnrichedArticle) -> Result<UpsertOutcome, StoreError>;
}

/// Retrieves an article and extracts its readable text
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Source of the tracked asset catalog
#[async_trait]
pub trait AssetCatalog: Send + Sync {
    async fn list_top_assets(&self, limit: usize) -> Result<Vec<AssetListing>, CatalogError>;
}

/// Source of raw article listings
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Recent articles, scoped to `entity` when given.
    async fn list_recent_articles(
        &self,
        entity: Option<&Entity>,
    ) -> Result<Vec<ArticleReference>, CatalogError>;
}

/// Source of current and historical prices
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn current_price(&self, entity: &Entity) -> Result<f64, CatalogError>;

    async fn historical_price(
        &self,
        entity: &Entity,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<f64, CatalogError>;
}

/// Text sentiment scoring. Infallible for any input.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScore;
}
