//! Periodic news collection: article enrichment (dedup, fetch, sentiment,
//! entity weighting, persistence) and rate snapshot refresh.

pub mod collector;
pub mod config;
pub mod fetcher;
pub mod pipeline;
pub mod queries;
pub mod rates;

#[cfg(test)]
mod testing;

pub use collector::{run_collection_loop, run_rate_loop, CollectionCycle, RateCycle};
pub use config::{CollectorConfig, NewsScope};
pub use fetcher::{HttpContentFetcher, TextExtractor};
pub use pipeline::{EnrichmentPipeline, PipelineStats};
pub use queries::{get_articles, get_rates};
pub use rates::{RateCache, RateRefreshLoop, RateRefreshStats};
