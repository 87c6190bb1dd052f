//! Stubbed fetch service
//!
//! Keys map to canned outcomes; every fetch bumps a per-key counter before
//! the lookup, so attempts that hit no stub are counted too. The registry
//! sits behind one `async_lock::Mutex`, which totally orders `stub`,
//! `fetch` and `call_count` on an instance.

use super::FetchService;
use crate::errors::{FetchError, StubFailure};
use async_lock::Mutex;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, trace};

/// Canned result for a stubbed key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubOutcome<E> {
    /// Fetch returns this payload
    Success(Vec<u8>),
    /// Fetch fails with this error
    Failure(E),
}

impl<E> StubOutcome<E> {
    /// Successful outcome carrying `payload`
    pub fn success(payload: impl Into<Vec<u8>>) -> Self {
        Self::Success(payload.into())
    }

    /// Failed outcome carrying `error`
    pub fn failure(error: E) -> Self {
        Self::Failure(error)
    }
}

impl<E> From<Result<Vec<u8>, E>> for StubOutcome<E> {
    fn from(result: Result<Vec<u8>, E>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(error) => Self::Failure(error),
        }
    }
}

#[derive(Debug)]
struct RegistryEntry<E> {
    /// `None` until the key is stubbed
    outcome: Option<StubOutcome<E>>,
    /// Completed fetches for the key, never reset
    calls: u64,
}

impl<E> Default for RegistryEntry<E> {
    fn default() -> Self {
        Self {
            outcome: None,
            calls: 0,
        }
    }
}

type Registry<K, E> = HashMap<K, RegistryEntry<E>>;

/// Mock of a network fetch dependency
///
/// Clones share the same registry. A fresh instance starts empty; nothing
/// is shared between instances.
#[derive(Debug)]
pub struct MockFetchService<K = String, E = StubFailure> {
    registry: Arc<Mutex<Registry<K, E>>>,
}

impl<K, E> Clone for MockFetchService<K, E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<K, E> Default for MockFetchService<K, E> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K> MockFetchService<K, StubFailure>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Create an empty service whose failures are [`StubFailure`]s
    ///
    /// Use `MockFetchService::<K, E>::default()` for a custom error type.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, E> MockFetchService<K, E>
where
    K: Eq + Hash + Clone + Debug,
    E: Clone,
{
    /// Register or replace the outcome for `key`
    ///
    /// The key's call count is left untouched.
    pub async fn stub(&self, key: K, outcome: StubOutcome<E>) {
        let mut registry = self.registry.lock().await;
        debug!(?key, success = matches!(outcome, StubOutcome::Success(_)), "stub registered");
        registry.entry(key).or_default().outcome = Some(outcome);
    }

    /// Stub `key` to return `payload`
    pub async fn stub_success(&self, key: K, payload: impl Into<Vec<u8>>) {
        self.stub(key, StubOutcome::success(payload)).await;
    }

    /// Stub `key` to fail with `error`
    pub async fn stub_failure(&self, key: K, error: E) {
        self.stub(key, StubOutcome::failure(error)).await;
    }

    /// Record a call for `key` and return its stubbed outcome
    pub async fn fetch(&self, key: &K) -> Result<Vec<u8>, FetchError<E>> {
        let mut registry = self.registry.lock().await;
        let entry = registry.entry(key.clone()).or_default();
        entry.calls += 1;
        trace!(?key, calls = entry.calls, "fetch recorded");

        match &entry.outcome {
            Some(StubOutcome::Success(payload)) => Ok(payload.clone()),
            Some(StubOutcome::Failure(error)) => Err(FetchError::Stubbed(error.clone())),
            None => {
                debug!(?key, "fetch with no stub");
                Err(FetchError::no_stub(key))
            }
        }
    }

    /// Number of fetches issued for `key`, 0 if never fetched
    pub async fn call_count(&self, key: &K) -> u64 {
        let registry = self.registry.lock().await;
        registry.get(key).map_or(0, |entry| entry.calls)
    }

    /// Number of fetches issued across all keys
    pub async fn total_calls(&self) -> u64 {
        let registry = self.registry.lock().await;
        registry.values().map(|entry| entry.calls).sum()
    }
}

#[async_trait]
impl<K, E> FetchService for MockFetchService<K, E>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
    E: Clone + Send + Sync,
{
    type Key = K;
    type Error = FetchError<E>;

    async fn fetch(&self, key: &K) -> Result<Vec<u8>, FetchError<E>> {
        MockFetchService::fetch(self, key).await
    }
}
