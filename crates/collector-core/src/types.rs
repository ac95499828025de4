use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder written over characters that are not word characters.
pub const REPLACEMENT_CHAR: char = '_';

/// Replace every character that is neither an ASCII word character nor
/// whitespace with `_`.
pub fn normalize_token(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                REPLACEMENT_CHAR
            }
        })
        .collect()
}

/// A tracked asset, the unit of sentiment attribution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub symbol: String,
}

impl Entity {
    /// Build a normalized entity: the name is lowercased, both fields have
    /// non-word characters replaced.
    pub fn new(name: &str, symbol: &str) -> Self {
        Self {
            name: normalize_token(&name.to_lowercase()),
            symbol: normalize_token(symbol),
        }
    }

    /// Number of space separated words in the name.
    pub fn word_count(&self) -> usize {
        self.name.split(' ').count()
    }
}

/// Raw catalog row as returned by the asset catalog provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetListing {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub percent_change_7d: Option<f64>,
}

impl AssetListing {
    pub fn to_entity(&self) -> Entity {
        Entity::new(&self.name, &self.symbol)
    }
}

/// Article listing entry produced by the news provider. Consumed by the
/// enrichment pipeline, never stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleReference {
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub title: String,
    pub source_id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Symbol of the entity the listing was queried for, if any.
    #[serde(default)]
    pub entity: Option<String>,
}

/// Occurrence count per entity symbol. Ordered so persisted JSON is stable.
pub type Weighting = BTreeMap<String, u32>;

/// Output of a sentiment scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Sum of polarity weights of recognized tokens
    pub score: f64,
    /// `score / token_count`, 0.0 for empty input
    pub comparative: f64,
}

/// Persisted, enriched article record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedArticle {
    pub url: String,
    /// Publication time in epoch milliseconds
    pub timestamp: i64,
    pub weighting: Weighting,
    pub score: f64,
    pub comparative: f64,
    pub title: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin: Option<String>,
}

impl EnrichedArticle {
    pub fn from_reference(
        reference: &ArticleReference,
        sentiment: SentimentScore,
        weighting: Weighting,
    ) -> Self {
        Self {
            url: reference.url.clone(),
            timestamp: reference.published_at.timestamp_millis(),
            weighting,
            score: sentiment.score,
            comparative: sentiment.comparative,
            title: reference.title.clone(),
            source: reference.source_id.clone(),
            coin: reference.entity.clone(),
        }
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Result of an upsert. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

impl UpsertOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            UpsertOutcome::Inserted => "Added",
            UpsertOutcome::Replaced => "Replaced",
        }
    }
}

/// Current and look-back price of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub current: f64,
    pub past: f64,
}

impl RateSnapshot {
    /// Relative change from `past` to `current` in percent, `None` when the
    /// past price is zero.
    pub fn change_percent(&self) -> Option<f64> {
        if self.past == 0.0 {
            None
        } else {
            Some((self.current - self.past) / self.past * 100.0)
        }
    }
}
