//! Read access to collected results.

use crate::rates::RateCache;
use article_store::SqliteArticleStore;
use chrono::Utc;
use collector_core::{EnrichedArticle, RateSnapshot, StoreError};
use std::collections::HashMap;

/// Articles published within `window` of now, newest first.
pub async fn get_articles(
    store: &SqliteArticleStore,
    window: chrono::Duration,
) -> Result<Vec<EnrichedArticle>, StoreError> {
    store.recent(Utc::now() - window).await
}

/// Current contents of the rate cache.
pub async fn get_rates(cache: &RateCache) -> HashMap<String, RateSnapshot> {
    cache.snapshot().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use collector_core::{ArticleStore, Weighting};

    fn article(url: &str, age: Duration) -> EnrichedArticle {
        EnrichedArticle {
            url: url.to_string(),
            timestamp: (Utc::now() - age).timestamp_millis(),
            weighting: Weighting::new(),
            score: 0.0,
            comparative: 0.0,
            title: url.to_string(),
            source: "cointelegraph".to_string(),
            coin: None,
        }
    }

    #[tokio::test]
    async fn test_get_articles_returns_window_newest_first() {
        let store = SqliteArticleStore::connect("sqlite::memory:").await.unwrap();
        store.upsert(&article("two-days", Duration::days(2))).await.unwrap();
        store.upsert(&article("one-hour", Duration::hours(1))).await.unwrap();
        store.upsert(&article("month", Duration::days(30))).await.unwrap();

        let articles = get_articles(&store, Duration::weeks(1)).await.unwrap();

        let urls: Vec<&str> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["one-hour", "two-days"]);
    }

    #[tokio::test]
    async fn test_get_rates_on_empty_cache() {
        assert!(get_rates(&RateCache::new()).await.is_empty());
    }
}
