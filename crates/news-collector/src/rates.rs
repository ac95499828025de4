use chrono::Utc;
use collector_core::{CatalogError, Entity, RateSnapshot, RateSource};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Latest rate snapshot per entity name. Written only by the rate loop.
#[derive(Clone, Default)]
pub struct RateCache {
    inner: Arc<RwLock<HashMap<String, RateSnapshot>>>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the whole cache
    pub async fn snapshot(&self) -> HashMap<String, RateSnapshot> {
        self.inner.read().await.clone()
    }

    pub async fn get(&self, name: &str) -> Option<RateSnapshot> {
        self.inner.read().await.get(name).copied()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    async fn insert(&self, name: String, snapshot: RateSnapshot) {
        self.inner.write().await.insert(name, snapshot);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateRefreshStats {
    pub refreshed: usize,
    pub failed: usize,
}

/// Sequential refresh of current and look-back prices for every entity
pub struct RateRefreshLoop {
    source: Arc<dyn RateSource>,
    cache: RateCache,
    pacing: Duration,
    lookback: chrono::Duration,
}

impl RateRefreshLoop {
    pub fn new(source: Arc<dyn RateSource>, cache: RateCache) -> Self {
        Self {
            source,
            cache,
            pacing: Duration::from_secs(1),
            lookback: chrono::Duration::days(7),
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_lookback(mut self, lookback: chrono::Duration) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    /// One pass over `entities`, taken from the end. A failing entity keeps
    /// whatever snapshot it had before.
    pub async fn run(&self, mut entities: Vec<Entity>) -> RateRefreshStats {
        let mut stats = RateRefreshStats::default();

        while let Some(entity) = entities.pop() {
            match self.fetch_snapshot(&entity).await {
                Ok(snapshot) => {
                    tracing::debug!(
                        "Rate {}: {} -> {} ({:?}%)",
                        entity.name,
                        snapshot.past,
                        snapshot.current,
                        snapshot.change_percent()
                    );
                    self.cache.insert(entity.name, snapshot).await;
                    stats.refreshed += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to load rates for {}: {}", entity.symbol, e);
                    stats.failed += 1;
                }
            }

            if !entities.is_empty() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        tracing::info!(
            "Rates updated - {} refreshed, {} failed",
            stats.refreshed,
            stats.failed
        );
        stats
    }

    async fn fetch_snapshot(&self, entity: &Entity) -> Result<RateSnapshot, CatalogError> {
        let past = self
            .source
            .historical_price(entity, Utc::now() - self.lookback)
            .await?;
        let current = self.source.current_price(entity).await?;
        Ok(RateSnapshot { current, past })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeMarket;

    fn refresh_loop(market: FakeMarket) -> (Arc<FakeMarket>, RateRefreshLoop) {
        let market = Arc::new(market);
        let rate_loop = RateRefreshLoop::new(market.clone(), RateCache::new())
            .with_pacing(Duration::from_millis(1));
        (market, rate_loop)
    }

    #[tokio::test]
    async fn test_refresh_writes_snapshots_by_name() {
        let mut market = FakeMarket::default();
        market.prices.insert("btc".to_string(), (70_000.0, 60_000.0));
        market.prices.insert("eth".to_string(), (3_000.0, 3_300.0));
        let (_, rate_loop) = refresh_loop(market);

        let stats = rate_loop
            .run(vec![Entity::new("Bitcoin", "btc"), Entity::new("Ethereum", "eth")])
            .await;

        assert_eq!(stats, RateRefreshStats { refreshed: 2, failed: 0 });
        let btc = rate_loop.cache().get("bitcoin").await.unwrap();
        assert_eq!(btc, RateSnapshot { current: 70_000.0, past: 60_000.0 });
        assert_eq!(rate_loop.cache().len().await, 2);
    }

    #[tokio::test]
    async fn test_failed_entity_is_skipped() {
        let mut market = FakeMarket::default();
        market.prices.insert("btc".to_string(), (1.0, 2.0));
        let (_, rate_loop) = refresh_loop(market);

        let stats = rate_loop
            .run(vec![Entity::new("Bitcoin", "btc"), Entity::new("Nowhere", "nope")])
            .await;

        assert_eq!(stats, RateRefreshStats { refreshed: 1, failed: 1 });
        assert!(rate_loop.cache().get("nowhere").await.is_none());
        assert!(rate_loop.cache().get("bitcoin").await.is_some());
    }

    #[tokio::test]
    async fn test_entities_are_taken_as_a_stack() {
        let mut market = FakeMarket::default();
        market.prices.insert("a".to_string(), (1.0, 1.0));
        market.prices.insert("b".to_string(), (1.0, 1.0));
        let (market, rate_loop) = refresh_loop(market);

        rate_loop.run(vec![Entity::new("A", "a"), Entity::new("B", "b")]).await;

        assert_eq!(*market.price_calls.lock().unwrap(), vec!["b".to_string(), "a".to_string()]);
    }

    #[tokio::test]
    async fn test_later_refresh_overwrites_and_keeps_stale_entries() {
        let mut market = FakeMarket::default();
        market.prices.insert("btc".to_string(), (2.0, 1.0));
        let (_, first) = refresh_loop(market);
        first.run(vec![Entity::new("Bitcoin", "btc")]).await;

        let mut market = FakeMarket::default();
        market.prices.insert("eth".to_string(), (5.0, 4.0));
        let second = RateRefreshLoop::new(Arc::new(market), first.cache().clone())
            .with_pacing(Duration::from_millis(1));
        second
            .run(vec![Entity::new("Bitcoin", "btc"), Entity::new("Ethereum", "eth")])
            .await;

        let rates = second.cache().snapshot().await;
        assert_eq!(rates.len(), 2);
        assert_eq!(rates["bitcoin"], RateSnapshot { current: 2.0, past: 1.0 });
        assert_eq!(rates["ethereum"].current, 5.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_between_entities() {
        let mut market = FakeMarket::default();
        market.prices.insert("a".to_string(), (1.0, 1.0));
        market.prices.insert("c".to_string(), (1.0, 1.0));
        let rate_loop = RateRefreshLoop::new(Arc::new(market), RateCache::new());

        let start = tokio::time::Instant::now();
        let stats = rate_loop
            .run(vec![Entity::new("A", "a"), Entity::new("B", "b"), Entity::new("C", "c")])
            .await;

        // Default pacing of 1 s applies after failures too, but not after the last entity
        assert_eq!(stats, RateRefreshStats { refreshed: 2, failed: 1 });
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }
}
