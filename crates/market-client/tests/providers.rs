use chrono::{TimeZone, Utc};
use collector_core::{AssetCatalog, CatalogError, Entity, NewsSource, RateSource};
use httpmock::{Method::GET, MockServer};
use market_client::{CoinMarketCapClient, CryptoCompareClient, HttpTransport};
use serde_json::json;
use std::time::Duration;

fn transport() -> HttpTransport {
    HttpTransport::new(1000).with_retry_wait(Duration::from_millis(10))
}

fn cryptocompare(server: &MockServer) -> CryptoCompareClient {
    CryptoCompareClient::with_base_url(Some("cc-key".to_string()), &server.base_url(), "usd", transport())
}

#[tokio::test]
async fn offline_listings_map_name_symbol_and_change() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/cryptocurrency/listings/latest")
            .query_param("limit", "2")
            .header("x-cmc_pro_api_key", "cmc-key");
        then.status(200).json_body(json!({
            "status": { "error_code": 0, "error_message": null },
            "data": [
                { "name": "Bitcoin", "symbol": "BTC", "quote": { "USD": { "price": 64000.0, "percent_change_7d": 3.5 } } },
                { "name": "Bitcoin Cash", "symbol": "BCH", "quote": {} }
            ]
        }));
    });

    let client = CoinMarketCapClient::with_base_url(Some("cmc-key".to_string()), &server.base_url(), transport());
    let assets = client.list_top_assets(2).await.unwrap();

    mock.assert();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].name, "Bitcoin");
    assert_eq!(assets[0].percent_change_7d, Some(3.5));
    assert_eq!(assets[1].percent_change_7d, None);
    assert_eq!(assets[1].to_entity(), Entity::new("bitcoin cash", "BCH"));
}

#[tokio::test]
async fn offline_listings_http_error_is_catalog_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/cryptocurrency/listings/latest");
        then.status(401).json_body(json!({
            "status": { "error_code": 1002, "error_message": "API key missing." }
        }));
    });

    let client = CoinMarketCapClient::with_base_url(None, &server.base_url(), transport());
    let err = client.list_top_assets(100).await.unwrap_err();
    assert!(matches!(err, CatalogError::ApiError(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn offline_global_news_list() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/data/v2/news/")
            .query_param("lang", "EN")
            .header("authorization", "Apikey cc-key");
        then.status(200).json_body(json!({
            "Type": 100,
            "Message": "News list successfully returned",
            "Data": [
                {
                    "id": "1",
                    "url": "https://news.example/a",
                    "published_on": 1_700_000_000,
                    "title": "Bitcoin rallies",
                    "source": "coindesk",
                    "body": "Bitcoin rallied overnight"
                },
                {
                    "id": "2",
                    "url": "https://news.example/b",
                    "published_on": 1_700_000_600,
                    "title": "Ether dips",
                    "source": "cointelegraph",
                    "body": ""
                }
            ]
        }));
    });

    let articles = cryptocompare(&server).list_recent_articles(None).await.unwrap();

    mock.assert();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].url, "https://news.example/a");
    assert_eq!(articles[0].published_at, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    assert_eq!(articles[0].source_id, "coindesk");
    assert_eq!(articles[0].description.as_deref(), Some("Bitcoin rallied overnight"));
    assert_eq!(articles[1].description, None);
    assert!(articles.iter().all(|a| a.entity.is_none()));
}

#[tokio::test]
async fn offline_per_entity_news_is_tagged() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/data/v2/news/")
            .query_param("categories", "BTC");
        then.status(200).json_body(json!({
            "Data": [{
                "url": "https://news.example/btc",
                "published_on": 1_700_000_000,
                "title": "BTC",
                "source": "decrypt"
            }]
        }));
    });

    let entity = Entity::new("Bitcoin", "btc");
    let articles = cryptocompare(&server).list_recent_articles(Some(&entity)).await.unwrap();

    mock.assert();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].entity.as_deref(), Some("btc"));
}

#[tokio::test]
async fn offline_error_payload_with_200_is_catalog_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/v2/news/");
        then.status(200).json_body(json!({
            "Response": "Error",
            "Message": "You are over your rate limit",
            "Data": {}
        }));
    });

    let err = cryptocompare(&server).list_recent_articles(None).await.unwrap_err();
    match err {
        CatalogError::ApiError(message) => assert!(message.contains("rate limit")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn offline_current_and_historical_price() {
    let server = MockServer::start();
    let current = server.mock(|when, then| {
        when.method(GET)
            .path("/data/price")
            .query_param("fsym", "ETH")
            .query_param("tsyms", "USD");
        then.status(200).json_body(json!({ "USD": 3100.5 }));
    });
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let historical = server.mock(|when, then| {
        when.method(GET)
            .path("/data/pricehistorical")
            .query_param("fsym", "ETH")
            .query_param("tsyms", "USD")
            .query_param("ts", at.timestamp().to_string());
        then.status(200).json_body(json!({ "ETH": { "USD": 2900.0 } }));
    });

    let client = cryptocompare(&server);
    let entity = Entity::new("Ethereum", "eth");

    assert_eq!(client.current_price(&entity).await.unwrap(), 3100.5);
    assert_eq!(client.historical_price(&entity, at).await.unwrap(), 2900.0);
    current.assert();
    historical.assert();
}

#[tokio::test]
async fn offline_missing_price_is_invalid_data() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/price");
        then.status(200).json_body(json!({ "EUR": 1.0 }));
    });

    let err = cryptocompare(&server)
        .current_price(&Entity::new("Ethereum", "ETH"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidData(_)));
}

#[tokio::test]
async fn offline_persistent_429_gives_up() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/data/price");
        then.status(429);
    });

    let err = cryptocompare(&server)
        .current_price(&Entity::new("Bitcoin", "BTC"))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::RateLimited(_)));
    mock.assert_calls(3);
}
