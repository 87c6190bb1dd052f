//! TDD Testing Toolkit
//!
//! Helpers for deterministic async tests: a deadline race that bounds any
//! future, async test wrappers built on it, and a stubbed fetch service
//! that stands in for a network dependency and counts its calls.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! tdd-testkit = { path = "../tdd-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use std::time::Duration;
//! use tdd_testkit::*;
//!
//! #[tokio::test]
//! async fn fetches_profile() -> tdd_testkit::Result<()> {
//!     let mock = MockFetchService::new();
//!     mock.stub_success("https://api.example.com".to_string(), b"test".to_vec()).await;
//!
//!     let fetcher = mock.clone();
//!     let data = race_with_timeout(Duration::from_millis(500), async move {
//!         fetcher.fetch(&"https://api.example.com".to_string()).await
//!     })
//!     .await
//!     .map_err(|e| TestkitError::failed(e.to_string()))?;
//!
//!     assert_eq!(data, b"test".to_vec());
//!     assert_eq!(mock.call_count(&"https://api.example.com".to_string()).await, 1);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod config;
pub mod errors;
pub mod logging;
pub mod mocks;
pub mod race;

// Re-export commonly used items
pub use assertions::*;
pub use config::TestkitConfig;
pub use errors::{FetchError, RaceError, Result, StubFailure, TestkitError};
pub use logging::{init_test_tracing, init_test_tracing_with};
pub use mocks::{FetchService, MockFetchService, Mockable, StubOutcome};
pub use race::race_with_timeout;
