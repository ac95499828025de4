use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// How article listings are requested from the news provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsScope {
    /// One unscoped listing matched against every entity
    Global,
    /// One listing per entity; records are keyed by `(url, coin)`
    PerEntity,
}

impl FromStr for NewsScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(NewsScope::Global),
            "per-entity" | "per_entity" | "entity" => Ok(NewsScope::PerEntity),
            other => bail!("unknown NEWS_SCOPE '{}' (expected 'global' or 'per-entity')", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    // Store
    pub database_url: String,

    // Provider credentials (optional: requests go out unauthenticated)
    pub coinmarketcap_api_key: Option<String>,
    pub crypto_compare_api_key: Option<String>,

    // Article collection
    pub catalog_size: usize,              // 100 top assets
    pub news_scope: NewsScope,
    pub collect_interval_secs: u64,       // 3600 (1 hour)
    pub retry_delay_secs: u64,            // 10
    pub fetch_timeout_secs: u64,          // 30

    // Rate refresh
    pub rate_interval_secs: u64,          // 600 (10 minutes)
    pub rate_pacing_ms: u64,              // 1000
    pub rate_lookback_days: i64,          // 7
    pub quote_currency: String,           // USD

    // Read API
    pub article_window_days: i64,         // 7

    // Provider request budget
    pub provider_rate_limit: usize,       // requests per minute
}

impl CollectorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Self {
            database_url: get("DATABASE_URL", "sqlite:articles.db?mode=rwc"),

            coinmarketcap_api_key: lookup("COINMARKETCAP_API_KEY").filter(|k| !k.is_empty()),
            crypto_compare_api_key: lookup("CRYPTO_COMPARE_API_KEY").filter(|k| !k.is_empty()),

            catalog_size: get("CATALOG_SIZE", "100")
                .parse()
                .context("CATALOG_SIZE must be a positive integer")?,
            news_scope: get("NEWS_SCOPE", "global").parse()?,
            collect_interval_secs: get("COLLECT_INTERVAL_SECS", "3600")
                .parse()
                .context("COLLECT_INTERVAL_SECS must be an integer")?,
            retry_delay_secs: get("RETRY_DELAY_SECS", "10")
                .parse()
                .context("RETRY_DELAY_SECS must be an integer")?,
            fetch_timeout_secs: get("FETCH_TIMEOUT_SECS", "30")
                .parse()
                .context("FETCH_TIMEOUT_SECS must be an integer")?,

            rate_interval_secs: get("RATE_INTERVAL_SECS", "600")
                .parse()
                .context("RATE_INTERVAL_SECS must be an integer")?,
            rate_pacing_ms: get("RATE_PACING_MS", "1000")
                .parse()
                .context("RATE_PACING_MS must be an integer")?,
            rate_lookback_days: get("RATE_LOOKBACK_DAYS", "7")
                .parse()
                .context("RATE_LOOKBACK_DAYS must be an integer")?,
            quote_currency: get("QUOTE_CURRENCY", "USD").to_uppercase(),

            article_window_days: get("ARTICLE_WINDOW_DAYS", "7")
                .parse()
                .context("ARTICLE_WINDOW_DAYS must be an integer")?,

            provider_rate_limit: get("PROVIDER_RATE_LIMIT", "30")
                .parse()
                .context("PROVIDER_RATE_LIMIT must be an integer")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog_size == 0 {
            bail!("CATALOG_SIZE must be greater than 0");
        }
        if self.collect_interval_secs == 0 || self.rate_interval_secs == 0 {
            bail!("collection and rate intervals must be greater than 0");
        }
        if self.rate_lookback_days <= 0 || self.article_window_days <= 0 {
            bail!("RATE_LOOKBACK_DAYS and ARTICLE_WINDOW_DAYS must be greater than 0");
        }
        if self.provider_rate_limit == 0 {
            bail!("PROVIDER_RATE_LIMIT must be greater than 0");
        }
        if self.quote_currency.is_empty() {
            bail!("QUOTE_CURRENCY must not be empty");
        }
        Ok(())
    }

    pub fn collect_interval(&self) -> Duration {
        Duration::from_secs(self.collect_interval_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn rate_interval(&self) -> Duration {
        Duration::from_secs(self.rate_interval_secs)
    }

    pub fn rate_pacing(&self) -> Duration {
        Duration::from_millis(self.rate_pacing_ms)
    }

    pub fn rate_lookback(&self) -> chrono::Duration {
        chrono::Duration::days(self.rate_lookback_days)
    }

    pub fn article_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.article_window_days)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
