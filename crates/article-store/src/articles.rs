use crate::db::ArticleDb;
use crate::models::{coin_key, ArticleFilter, ArticleRow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use collector_core::{normalize_token, ArticleStore, EnrichedArticle, StoreError, UpsertOutcome};
use sqlx::{QueryBuilder, Sqlite};

const SELECT_COLUMNS: &str =
    "SELECT url, coin, timestamp, weighting, score, comparative, title, source FROM articles";

/// SQLite-backed article store, keyed by `(url, coin)`
#[derive(Clone)]
pub struct SqliteArticleStore {
    db: ArticleDb,
}

impl SqliteArticleStore {
    pub fn new(db: ArticleDb) -> Self {
        Self { db }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        Ok(Self::new(ArticleDb::new(database_url).await?))
    }

    pub fn db(&self) -> &ArticleDb {
        &self.db
    }

    /// Record for `url` under the given coin scope
    pub async fn find_one(&self, url: &str, coin: Option<&str>) -> Result<Option<EnrichedArticle>, StoreError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!("{} WHERE url = ? AND coin = ?", SELECT_COLUMNS))
            .bind(url)
            .bind(coin_key(coin))
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        row.map(EnrichedArticle::try_from).transpose()
    }

    /// Every record for `url`, whatever its coin scope
    pub async fn find_by_url(&self, url: &str) -> Result<Vec<EnrichedArticle>, StoreError> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!("{} WHERE url = ? ORDER BY coin", SELECT_COLUMNS))
            .bind(url)
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        rows.into_iter().map(EnrichedArticle::try_from).collect()
    }

    /// Records matching `filter`, newest first
    pub async fn find(&self, filter: &ArticleFilter) -> Result<Vec<EnrichedArticle>, StoreError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_COLUMNS);
        query.push(" WHERE 1 = 1");

        if let Some(coin) = &filter.coin {
            query.push(" AND coin = ").push_bind(coin.clone());
        }
        if let Some(symbol) = &filter.symbol {
            query
                .push(" AND json_extract(weighting, '$.\"' || ")
                .push_bind(symbol.clone())
                .push(" || '\"') IS NOT NULL");
        }
        if let Some(since) = filter.since {
            query.push(" AND timestamp >= ").push_bind(since.timestamp_millis());
        }

        query.push(" ORDER BY timestamp DESC, url");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        let rows = query
            .build_query_as::<ArticleRow>()
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        rows.into_iter().map(EnrichedArticle::try_from).collect()
    }

    /// Records published at or after `since`, newest first
    pub async fn recent(&self, since: DateTime<Utc>) -> Result<Vec<EnrichedArticle>, StoreError> {
        self.find(&ArticleFilter::since(since)).await
    }

    /// Remove every record attributed to `coin`, compared as a normalized,
    /// case-insensitive symbol. Unscoped records are never touched. Maintenance only.
    pub async fn delete_by_coin(&self, coin: &str) -> Result<u64, StoreError> {
        let coin = normalize_token(coin.trim());
        if coin.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM articles WHERE coin = ? COLLATE NOCASE")
            .bind(&coin)
            .execute(self.db.pool())
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        tracing::info!("{} document(s) deleted for coin {}", result.rows_affected(), coin);
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;
        Ok(count)
    }
}

#[async_trait]
impl ArticleStore for SqliteArticleStore {
    async fn exists(&self, url: &str, coin: Option<&str>) -> Result<bool, StoreError> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM articles WHERE url = ? AND coin = ? LIMIT 1")
            .bind(url)
            .bind(coin_key(coin))
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        Ok(found.is_some())
    }

    async fn upsert(&self, article: &EnrichedArticle) -> Result<UpsertOutcome, StoreError> {
        let weighting = serde_json::to_string(&article.weighting)
            .map_err(|e| StoreError::Write(format!("weighting of {}: {}", article.url, e)))?;
        let coin = coin_key(article.coin.as_deref());

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let existing: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM articles WHERE url = ? AND coin = ?")
            .bind(&article.url)
            .bind(coin)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO articles (url, coin, timestamp, weighting, score, comparative, title, source)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(url, coin) DO UPDATE SET
                timestamp = excluded.timestamp,
                weighting = excluded.weighting,
                score = excluded.score,
                comparative = excluded.comparative,
                title = excluded.title,
                source = excluded.source,
                updated_at = datetime('now')
            "#,
        )
        .bind(&article.url)
        .bind(coin)
        .bind(article.timestamp)
        .bind(&weighting)
        .bind(article.score)
        .bind(article.comparative)
        .bind(&article.title)
        .bind(&article.source)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;

        tx.commit().await.map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(if existing.is_some() {
            UpsertOutcome::Replaced
        } else {
            UpsertOutcome::Inserted
        })
    }
}
