#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]
//! End-to-end flows: stubbed dependency exercised under a deadline

use serial_test::serial;
use std::time::Duration;
use tdd_testkit::{
    async_test, async_test_with_timeout, race_with_timeout, FetchError, MockFetchService,
    StubFailure, TestkitError,
};

async fn perform_async_operation() -> String {
    tokio::time::sleep(Duration::from_millis(100)).await;
    "success".to_string()
}

#[tokio::test]
#[serial]
async fn test_async_operation_within_default_deadline() {
    async_test(|| async {
        let result = perform_async_operation().await;
        assert_eq!(result, "success");
        Ok(())
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_mock_network_under_deadline() {
    let mock = MockFetchService::new();
    let url = "https://api.example.com".to_string();
    mock.stub_success(url.clone(), b"test".to_vec()).await;

    let fetcher = mock.clone();
    let fetch_url = url.clone();
    let data = async_test_with_timeout(Duration::from_secs(1), || async move {
        Ok(fetcher.fetch(&fetch_url).await?)
    })
    .await
    .unwrap();

    assert_eq!(data, b"test".to_vec());
    assert_eq!(mock.call_count(&url).await, 1);
}

#[tokio::test]
async fn test_stubbed_failure_surfaces_through_race() {
    let mock = MockFetchService::new();
    let url = "https://api.example.com/flaky".to_string();
    mock.stub_failure(url.clone(), StubFailure::new("reset by peer")).await;

    let fetcher = mock.clone();
    let fetch_url = url.clone();
    let err = race_with_timeout(Duration::from_millis(500), async move {
        fetcher.fetch(&fetch_url).await
    })
    .await
    .unwrap_err();

    assert_eq!(
        err.into_operation_error(),
        Some(FetchError::Stubbed(StubFailure::new("reset by peer")))
    );
    assert_eq!(mock.call_count(&url).await, 1);
}

#[tokio::test]
async fn test_slow_dependency_times_out_but_call_is_counted() {
    let mock: MockFetchService = MockFetchService::new();
    let url = "https://api.example.com/slow".to_string();
    mock.stub_success(url.clone(), b"late".to_vec()).await;

    let fetcher = mock.clone();
    let fetch_url = url.clone();
    let err = async_test_with_timeout(Duration::from_millis(50), || async move {
        let data = fetcher.fetch(&fetch_url).await?;
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(data)
    })
    .await
    .unwrap_err();

    assert_eq!(
        err,
        TestkitError::Timeout {
            after: Duration::from_millis(50)
        }
    );
    assert_eq!(mock.call_count(&url).await, 1);
}

#[tokio::test]
async fn test_missing_stub_fails_test_body() {
    let mock: MockFetchService = MockFetchService::new();

    let fetcher = mock.clone();
    let err = async_test_with_timeout(Duration::from_secs(1), || async move {
        fetcher.fetch(&"https://api.example.com/none".to_string()).await?;
        Ok(())
    })
    .await
    .unwrap_err();

    assert!(matches!(err, TestkitError::Failed { .. }));
    assert_eq!(mock.call_count(&"https://api.example.com/none".to_string()).await, 1);
}
