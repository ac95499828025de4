use std::sync::Arc;

use anyhow::{bail, Context, Result};
use article_store::SqliteArticleStore;
use market_client::{CoinMarketCapClient, CryptoCompareClient, HttpTransport};
use news_collector::{
    get_articles, get_rates, run_collection_loop, run_rate_loop, CollectionCycle, CollectorConfig,
    EnrichmentPipeline, HttpContentFetcher, RateCache, RateCycle, RateRefreshLoop,
};
use sentiment_analysis::LexiconScorer;
use tokio::signal::unix::SignalKind;
use tokio::sync::watch;

const DEFAULT_LOG_FILTER: &str =
    "news_collector=info,market_client=warn,article_store=info,sentiment_analysis=warn";

#[derive(Debug, PartialEq)]
enum Mode {
    Serve,
    Once,
    PurgeCoin(String),
    Recent,
}

fn parse_mode(args: &[String]) -> Result<Mode> {
    match args.first().map(String::as_str) {
        None => Ok(Mode::Serve),
        Some("--once") => Ok(Mode::Once),
        Some("--recent") => Ok(Mode::Recent),
        Some("--purge-coin") => match args.get(1) {
            Some(coin) if !coin.is_empty() => Ok(Mode::PurgeCoin(coin.clone())),
            _ => bail!("--purge-coin requires a coin symbol"),
        },
        Some(other) => bail!("unknown argument '{}' (expected --once, --recent or --purge-coin SYMBOL)", other),
    }
}

fn init_tracing() {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter()).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env, init tracing
    dotenvy::dotenv().ok();
    init_tracing();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
        tracing::error!("PANIC: {info}");
    }));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = parse_mode(&args)?;

    // 2. Configuration
    let config = CollectorConfig::from_env()?;
    tracing::info!("Configuration loaded and validated");
    tracing::info!("  Catalog size: {}", config.catalog_size);
    tracing::info!("  News scope: {:?}", config.news_scope);
    tracing::info!("  Collect interval: {}s", config.collect_interval_secs);
    tracing::info!("  Rate interval: {}s", config.rate_interval_secs);
    tracing::info!("  Quote currency: {}", config.quote_currency);

    // 3. Store
    let store = Arc::new(
        SqliteArticleStore::connect(&config.database_url)
            .await
            .with_context(|| format!("Failed to open article store at {}", config.database_url))?,
    );
    store
        .db()
        .ping()
        .await
        .context("Database connectivity check failed")?;
    tracing::info!("Startup check: database OK ({} articles)", store.count().await?);

    // Maintenance and read modes exit before any provider is touched
    match &mode {
        Mode::PurgeCoin(coin) => {
            let deleted = store.delete_by_coin(coin).await?;
            tracing::info!("Purged {} article(s) for {}", deleted, coin);
            return Ok(());
        }
        Mode::Recent => {
            let articles = get_articles(&store, config.article_window()).await?;
            println!("{}", serde_json::to_string_pretty(&articles)?);
            return Ok(());
        }
        Mode::Serve | Mode::Once => {}
    }

    // 4. Providers
    let catalog = Arc::new(CoinMarketCapClient::new(
        config.coinmarketcap_api_key.clone(),
        HttpTransport::new(config.provider_rate_limit),
    ));
    let market = Arc::new(CryptoCompareClient::new(
        config.crypto_compare_api_key.clone(),
        &config.quote_currency,
        HttpTransport::new(config.provider_rate_limit),
    ));
    let fetcher = Arc::new(HttpContentFetcher::new(config.fetch_timeout())?);

    // 5. Cycles
    let pipeline = EnrichmentPipeline::new(store.clone(), fetcher, Arc::new(LexiconScorer::new()))
        .with_retry_delay(config.retry_delay());
    let collection = Arc::new(CollectionCycle::new(
        catalog.clone(),
        market.clone(),
        pipeline,
        config.catalog_size,
        config.news_scope,
    ));

    let rate_cache = RateCache::new();
    let refresh = RateRefreshLoop::new(market, rate_cache.clone())
        .with_pacing(config.rate_pacing())
        .with_lookback(config.rate_lookback());
    let rates = Arc::new(RateCycle::new(catalog, refresh, config.catalog_size));

    if mode == Mode::Once {
        let stats = collection.run().await?;
        tracing::info!("Collection cycle done: {} persisted", stats.persisted());
        rates.run().await?;
        for (name, snapshot) in get_rates(&rate_cache).await {
            tracing::info!(
                "  {}: {} {} ({:+.2}% over {} days)",
                name,
                snapshot.current,
                config.quote_currency,
                snapshot.change_percent().unwrap_or(0.0),
                config.rate_lookback_days
            );
        }
        return Ok(());
    }

    // 6. Run both loops until SIGINT/SIGTERM
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let collect_task = tokio::spawn(run_collection_loop(
        collection,
        config.collect_interval(),
        shutdown_rx.clone(),
    ));
    let rate_task = tokio::spawn(run_rate_loop(rates, config.rate_interval(), shutdown_rx));

    tracing::info!("Collector is now running. Press Ctrl+C to stop.");

    let mut sigterm = tokio::signal::unix::signal(SignalKind::terminate())?;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received SIGINT");
        }
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM");
        }
    }

    tracing::info!("Shutdown signal received, waiting for running cycles to finish...");
    shutdown_tx.send(true).ok();
    let (collect_result, rate_result) = tokio::join!(collect_task, rate_task);
    if let Err(e) = collect_result {
        tracing::error!("Collection task ended abnormally: {}", e);
    }
    if let Err(e) = rate_result {
        tracing::error!("Rate task ended abnormally: {}", e);
    }

    tracing::info!("News collector shut down.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode(&args(&[])).unwrap(), Mode::Serve);
        assert_eq!(parse_mode(&args(&["--once"])).unwrap(), Mode::Once);
        assert_eq!(parse_mode(&args(&["--recent"])).unwrap(), Mode::Recent);
        assert_eq!(
            parse_mode(&args(&["--purge-coin", "XRP"])).unwrap(),
            Mode::PurgeCoin("XRP".to_string())
        );
        assert!(parse_mode(&args(&["--purge-coin"])).is_err());
        assert!(parse_mode(&args(&["--bogus"])).is_err());
    }
}
