use std::time::Duration;

use httpmock::{Method::GET, MockServer};
use url::Url;

use esg_dashboard::{CacheMode, EsgClient, EsgError, PriceLoader, RetryConfig, Backoff};

use crate::common::{PRICE_PATH, client_for, fixture, mock_prices};

#[tokio::test]
async fn fetches_one_series_over_http() {
    let server = MockServer::start();
    let mock = mock_prices(&server);
    let client = client_for(&server);

    let series = PriceLoader::new(&client).fetch_series("MSFT").await.unwrap();

    mock.assert();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].price, 239.58);
}

#[tokio::test]
async fn unknown_symbol_rejects_the_fetch() {
    let server = MockServer::start();
    let _mock = mock_prices(&server);
    let client = client_for(&server);

    let err = PriceLoader::new(&client).fetch_series("TSLA").await.unwrap_err();
    assert!(matches!(err, EsgError::UnknownSymbol(_)), "got {err:?}");
}

#[tokio::test]
async fn cached_body_is_served_on_second_fetch() {
    let server = MockServer::start();
    let mock = mock_prices(&server);
    let client = EsgClient::builder()
        .base_url(Url::parse(&server.base_url()).unwrap())
        .cache_ttl(Duration::from_secs(10))
        .build()
        .unwrap();
    assert!(client.cache_enabled());

    let loader = PriceLoader::new(&client);
    let first = loader.fetch_table().await.unwrap();
    let second = loader.fetch_table().await.unwrap();

    mock.assert_calls(1);
    assert_eq!(first, second);

    let _ = PriceLoader::new(&client)
        .cache_mode(CacheMode::Refresh)
        .fetch_table()
        .await
        .unwrap();
    mock.assert_calls(2);

    let _ = PriceLoader::new(&client)
        .cache_mode(CacheMode::Bypass)
        .fetch_table()
        .await
        .unwrap();
    mock.assert_calls(3);
}

#[tokio::test]
async fn no_cache_means_every_fetch_hits_the_server() {
    let server = MockServer::start();
    let mock = mock_prices(&server);
    let client = client_for(&server);

    let loader = PriceLoader::new(&client);
    loader.fetch_table().await.unwrap();
    loader.fetch_table().await.unwrap();

    mock.assert_calls(2);
}

#[tokio::test]
async fn single_attempt_by_default() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(PRICE_PATH);
        then.status(503);
    });
    let client = client_for(&server);

    let err = PriceLoader::new(&client).fetch_table().await.unwrap_err();

    mock.assert_calls(1);
    assert!(matches!(err, EsgError::Status { status: 503, .. }));
}

#[tokio::test]
async fn retry_policy_retries_listed_statuses() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(PRICE_PATH);
        then.status(503);
    });
    let client = client_for(&server);

    let policy = RetryConfig {
        enabled: true,
        max_retries: 2,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        ..RetryConfig::default()
    };
    let err = PriceLoader::new(&client)
        .retry_policy(Some(policy))
        .fetch_table()
        .await
        .unwrap_err();

    mock.assert_calls(3);
    assert!(matches!(err, EsgError::Status { status: 503, .. }));
}

#[tokio::test]
async fn client_level_retry_policy_applies_to_every_load() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(PRICE_PATH);
        then.status(429);
    });
    let client = EsgClient::builder()
        .base_url(Url::parse(&server.base_url()).unwrap())
        .retry_policy(RetryConfig {
            backoff: Backoff::Fixed(Duration::from_millis(1)),
            ..RetryConfig::standard()
        })
        .build()
        .unwrap();

    let _ = PriceLoader::new(&client).fetch_table().await.unwrap_err();
    mock.assert_calls(4);

    // sanity: the fixture itself is well-formed
    assert!(fixture("sp500_price_data.csv").starts_with("Date,"));
}
