use chrono::{DateTime, Utc};
use collector_core::{EnrichedArticle, StoreError, Weighting};
use serde::{Deserialize, Serialize};

/// Row shape of the `articles` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub url: String,
    pub coin: String,
    pub timestamp: i64,
    pub weighting: String,
    pub score: f64,
    pub comparative: f64,
    pub title: String,
    pub source: String,
}

impl TryFrom<ArticleRow> for EnrichedArticle {
    type Error = StoreError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let weighting: Weighting = serde_json::from_str(&row.weighting)
            .map_err(|e| StoreError::Decode(format!("weighting of {}: {}", row.url, e)))?;

        Ok(EnrichedArticle {
            url: row.url,
            timestamp: row.timestamp,
            weighting,
            score: row.score,
            comparative: row.comparative,
            title: row.title,
            source: row.source,
            coin: if row.coin.is_empty() { None } else { Some(row.coin) },
        })
    }
}

/// Stored key for an optional coin scope. Unscoped records use ''.
pub(crate) fn coin_key(coin: Option<&str>) -> &str {
    coin.unwrap_or("")
}

/// Criteria for `SqliteArticleStore::find`. All set fields must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleFilter {
    /// Attributed coin scope; `Some("")` selects unscoped records.
    pub coin: Option<String>,
    /// Only articles whose weighting mentions this symbol
    pub symbol: Option<String>,
    /// Only articles published at or after this instant
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl ArticleFilter {
    pub fn since(since: DateTime<Utc>) -> Self {
        Self {
            since: Some(since),
            ..Default::default()
        }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    pub fn with_coin(mut self, coin: &str) -> Self {
        self.coin = Some(coin.to_string());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
