//! # Mock dependencies
//!
//! Stateful stand-ins for dependencies that would otherwise reach the
//! network. Each mock owns its state behind an internal lock and is only
//! reachable through its methods, so clones can be handed to concurrently
//! running tasks.
//!
//! ## Usage in Tests
//!
//! ```rust
//! use tdd_testkit::mocks::MockFetchService;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mock = MockFetchService::new();
//! let url = "https://api.example.com".to_string();
//! mock.stub_success(url.clone(), b"test".to_vec()).await;
//!
//! let data = mock.fetch(&url).await?;
//! assert_eq!(data, b"test".to_vec());
//! assert_eq!(mock.call_count(&url).await, 1);
//! # Ok::<(), tdd_testkit::TestkitError>(())
//! # }).unwrap();
//! ```

pub mod fetch;

pub use fetch::{MockFetchService, StubOutcome};

use async_trait::async_trait;

/// A type that can produce a test double of itself
pub trait Mockable {
    /// The mock standing in for `Self`
    type Mock;

    /// Build a fresh mock with no recorded state
    fn mock() -> Self::Mock;
}

/// Byte-fetching dependency, keyed by request
///
/// Code under test takes `impl FetchService` so tests can substitute
/// [`MockFetchService`] for the real network client.
#[async_trait]
pub trait FetchService: Send + Sync {
    /// Request identifier, e.g. a URL
    type Key: Send + Sync;
    /// Failure reported by a fetch
    type Error: Send;

    /// Fetch the payload addressed by `key`
    async fn fetch(&self, key: &Self::Key) -> Result<Vec<u8>, Self::Error>;
}
