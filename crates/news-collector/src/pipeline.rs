use collector_core::{
    ArticleReference, ArticleStore, ContentFetcher, EnrichedArticle, Entity, SentimentScorer,
    StoreError, UpsertOutcome,
};
use sentiment_analysis::compute_weighting;
use std::sync::Arc;
use std::time::Duration;

/// Progress is logged whenever the remaining queue length is a multiple of this.
const PROGRESS_EVERY: usize = 50;

const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Per-run counters, logged when the queue has drained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub inserted: usize,
    pub replaced: usize,
    /// Already persisted before this run
    pub skipped: usize,
    /// Soft failures: content could not be retrieved
    pub fetch_failures: usize,
    /// Whole-queue retries after a store failure
    pub retries: usize,
}

impl PipelineStats {
    pub fn persisted(&self) -> usize {
        self.inserted + self.replaced
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemOutcome {
    Found,
    FetchFailed,
    Persisted(UpsertOutcome),
}

/// Drains a queue of article references into enriched, persisted records.
///
/// Items are taken from the end of the queue one at a time. An item already
/// in the store is skipped, an item whose content cannot be fetched is
/// skipped with a warning, and every other item is scored, attributed to the
/// tracked entities and upserted. A store failure aborts the pass: the
/// remaining queue (including the item that failed) is retried in full after
/// the retry delay, for as long as it takes to drain.
pub struct EnrichmentPipeline {
    store: Arc<dyn ArticleStore>,
    fetcher: Arc<dyn ContentFetcher>,
    scorer: Arc<dyn SentimentScorer>,
    retry_delay: Duration,
}

impl EnrichmentPipeline {
    pub fn new(
        store: Arc<dyn ArticleStore>,
        fetcher: Arc<dyn ContentFetcher>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Self {
        Self {
            store,
            fetcher,
            scorer,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Process every reference in `queue`; returns once the queue is empty.
    pub async fn run(&self, mut queue: Vec<ArticleReference>, entities: &[Entity]) -> PipelineStats {
        let mut stats = PipelineStats::default();
        tracing::info!(
            "Calculating article sentiment - {} article(s) against {} entities",
            queue.len(),
            entities.len()
        );

        loop {
            match self.drain(&mut queue, entities, &mut stats).await {
                Ok(()) => break,
                Err(e) => {
                    stats.retries += 1;
                    tracing::error!(
                        "Store failure with {} article(s) remaining: {}. Retrying in {:?} ...",
                        queue.len(),
                        e,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }

        tracing::info!(
            "Calculating article sentiment - finished! ({} added, {} replaced, {} skipped, {} failed, {} retries)",
            stats.inserted,
            stats.replaced,
            stats.skipped,
            stats.fetch_failures,
            stats.retries
        );
        stats
    }

    /// One pass over the queue. The current item is popped only once it is
    /// done, so a store failure leaves it at the top for the next pass.
    async fn drain(
        &self,
        queue: &mut Vec<ArticleReference>,
        entities: &[Entity],
        stats: &mut PipelineStats,
    ) -> Result<(), StoreError> {
        while let Some(reference) = queue.last() {
            let outcome = self.process(reference, entities).await?;

            match outcome {
                ItemOutcome::Found => stats.skipped += 1,
                ItemOutcome::FetchFailed => stats.fetch_failures += 1,
                ItemOutcome::Persisted(UpsertOutcome::Inserted) => stats.inserted += 1,
                ItemOutcome::Persisted(UpsertOutcome::Replaced) => stats.replaced += 1,
            }

            queue.pop();
            if !queue.is_empty() && queue.len() % PROGRESS_EVERY == 0 {
                tracing::info!("Calculating article sentiment - {} to go", queue.len());
            }
        }
        Ok(())
    }

    async fn process(
        &self,
        reference: &ArticleReference,
        entities: &[Entity],
    ) -> Result<ItemOutcome, StoreError> {
        let coin = reference.entity.as_deref();

        if self.store.exists(&reference.url, coin).await? {
            tracing::debug!("Already stored, skipping {}", reference.url);
            return Ok(ItemOutcome::Found);
        }

        let text = match self.fetcher.fetch(&reference.url).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to fetch article -> {}: {}", reference.url, e);
                return Ok(ItemOutcome::FetchFailed);
            }
        };

        let sentiment = self.scorer.score(&text);
        let weighting = compute_weighting(&text, entities);
        let record = EnrichedArticle::from_reference(reference, sentiment, weighting);

        let outcome = self.store.upsert(&record).await?;
        tracing::info!(
            "{} - {} (score {}, comparative {:.4}, weighting {:?})",
            outcome.label(),
            record.url,
            record.score,
            record.comparative,
            record.weighting
        );

        Ok(ItemOutcome::Persisted(outcome))
    }
}
