use crate::config::NewsScope;
use crate::pipeline::{EnrichmentPipeline, PipelineStats};
use crate::rates::{RateRefreshLoop, RateRefreshStats};
use collector_core::{
    ArticleReference, AssetCatalog, CatalogError, CollectorResult, Entity, NewsSource,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Load and normalize the tracked entity catalog.
pub async fn load_entities(
    catalog: &dyn AssetCatalog,
    limit: usize,
) -> Result<Vec<Entity>, CatalogError> {
    let listings = catalog.list_top_assets(limit).await?;
    let entities: Vec<Entity> = listings.iter().map(|l| l.to_entity()).collect();
    tracing::info!("Loaded {} tracked entities", entities.len());
    Ok(entities)
}

/// One collection cycle: catalog, article listings, enrichment.
pub struct CollectionCycle {
    catalog: Arc<dyn AssetCatalog>,
    news: Arc<dyn NewsSource>,
    pipeline: EnrichmentPipeline,
    catalog_size: usize,
    scope: NewsScope,
}

impl CollectionCycle {
    pub fn new(
        catalog: Arc<dyn AssetCatalog>,
        news: Arc<dyn NewsSource>,
        pipeline: EnrichmentPipeline,
        catalog_size: usize,
        scope: NewsScope,
    ) -> Self {
        Self {
            catalog,
            news,
            pipeline,
            catalog_size,
            scope,
        }
    }

    /// Run one cycle to completion. Catalog and listing failures abort the
    /// cycle; store failures are retried inside the pipeline.
    pub async fn run(&self) -> CollectorResult<PipelineStats> {
        let entities = load_entities(self.catalog.as_ref(), self.catalog_size).await?;
        let queue = self.load_articles(&entities).await?;
        Ok(self.pipeline.run(queue, &entities).await)
    }

    async fn load_articles(&self, entities: &[Entity]) -> Result<Vec<ArticleReference>, CatalogError> {
        let articles = match self.scope {
            NewsScope::Global => self.news.list_recent_articles(None).await?,
            NewsScope::PerEntity => {
                let mut all = Vec::new();
                for entity in entities {
                    let mut listed = self.news.list_recent_articles(Some(entity)).await?;
                    for article in &mut listed {
                        article.entity.get_or_insert_with(|| entity.symbol.clone());
                    }
                    all.append(&mut listed);
                }
                all
            }
        };

        tracing::info!("Loading article metadata - {} found", articles.len());
        Ok(articles)
    }
}

/// One rate refresh cycle over a freshly loaded catalog.
pub struct RateCycle {
    catalog: Arc<dyn AssetCatalog>,
    refresh: RateRefreshLoop,
    catalog_size: usize,
}

impl RateCycle {
    pub fn new(catalog: Arc<dyn AssetCatalog>, refresh: RateRefreshLoop, catalog_size: usize) -> Self {
        Self {
            catalog,
            refresh,
            catalog_size,
        }
    }

    pub async fn run(&self) -> Result<RateRefreshStats, CatalogError> {
        let entities = load_entities(self.catalog.as_ref(), self.catalog_size).await?;
        Ok(self.refresh.run(entities).await)
    }
}

/// Repeat the collection cycle until shutdown. The next cycle is armed only
/// after the previous one returns; shutdown is observed between cycles.
pub async fn run_collection_loop(
    cycle: Arc<CollectionCycle>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if let Err(e) = cycle.run().await {
            tracing::error!("Collection cycle failed: {}", e);
        }

        tracing::info!("Collecting new articles in {:?} ...", interval);
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.changed() => break,
        }
    }
    tracing::info!("Collection loop stopped");
}

/// Repeat the rate cycle until shutdown, with the same arming rules as
/// [`run_collection_loop`].
pub async fn run_rate_loop(
    cycle: Arc<RateCycle>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if let Err(e) = cycle.run().await {
            tracing::error!("Rate cycle failed: {}", e);
        }

        tracing::info!("Updating rates in {:?} ...", interval);
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.changed() => break,
        }
    }
    tracing::info!("Rate loop stopped");
}
