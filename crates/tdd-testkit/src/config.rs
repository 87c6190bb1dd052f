//! Testkit configuration
//!
//! Settings come from defaults, an optional TOML file, and then environment
//! variables, in that order. The result is validated before use.

use crate::errors::{Result, TestkitError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the default test timeout, in milliseconds
pub const ENV_DEFAULT_TIMEOUT_MS: &str = "TDD_TESTKIT_DEFAULT_TIMEOUT_MS";

/// Environment variable overriding the tracing filter directive
pub const ENV_LOG_FILTER: &str = "TDD_TESTKIT_LOG";

/// Default bound applied by [`crate::async_test`]
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Configuration shared by the async test helpers and tracing setup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestkitConfig {
    /// Deadline for `async_test` bodies, in milliseconds
    pub default_timeout_ms: u64,
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for TestkitConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            log_filter: "warn,tdd_testkit=debug".to_string(),
        }
    }
}

impl TestkitConfig {
    /// Defaults merged with the environment, validated
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TDD_TESTKIT_*` environment variables on top of current values
    pub fn merge_with_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(ENV_DEFAULT_TIMEOUT_MS) {
            self.default_timeout_ms = value.trim().parse().map_err(|e| {
                TestkitError::config(format!("{ENV_DEFAULT_TIMEOUT_MS}={value:?}: {e}"))
            })?;
        }
        if let Ok(value) = std::env::var(ENV_LOG_FILTER) {
            self.log_filter = value;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_timeout_ms == 0 {
            return Err(TestkitError::invalid(
                "default_timeout_ms must be greater than zero",
            ));
        }
        if self.log_filter.trim().is_empty() {
            return Err(TestkitError::invalid("log_filter must not be empty"));
        }
        Ok(())
    }

    /// The default test deadline
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}
