//! Async test helpers built on the deadline race
//!
//! Test bodies return [`crate::Result`], so any component error can be
//! propagated with `?` and a hung body surfaces as
//! [`TestkitError::Timeout`] instead of stalling the suite.

use crate::config::TestkitConfig;
use crate::errors::{Result, TestkitError};
use crate::race::race_with_timeout;
use std::future::Future;
use std::time::Duration;

/// Run `block` under the configured default deadline (5 seconds unless
/// overridden by `TDD_TESTKIT_DEFAULT_TIMEOUT_MS`)
pub async fn async_test<F, Fut, T>(block: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let config = TestkitConfig::from_env()?;
    async_test_with_timeout(config.default_timeout(), block).await
}

/// Run `block` and fail with [`TestkitError::Timeout`] if it takes longer
/// than `timeout`
pub async fn async_test_with_timeout<F, Fut, T>(timeout: Duration, block: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    race_with_timeout(timeout, block())
        .await
        .map_err(TestkitError::from)
}

/// Assert that `future` completes within `duration`, returning its output
pub async fn assert_completes_within<F, T>(duration: Duration, future: F) -> Result<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    race_with_timeout(duration, async move { Ok::<_, TestkitError>(future.await) })
        .await
        .map_err(|err| {
            if err.is_timeout() {
                TestkitError::failed(format!("Operation did not complete within {duration:?}"))
            } else {
                TestkitError::from(err)
            }
        })
}

/// Assert that `future` is still running after `duration`
///
/// The future is cancelled once the deadline passes.
pub async fn assert_times_out<F, T>(duration: Duration, future: F) -> Result<()>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match race_with_timeout(duration, async move { Ok::<_, TestkitError>(future.await) }).await {
        Err(err) if err.is_timeout() => Ok(()),
        Ok(_) => Err(TestkitError::failed(format!(
            "Operation completed before {duration:?} elapsed"
        ))),
        Err(err) => Err(TestkitError::from(err)),
    }
}
