//! Tracing setup for test binaries

use crate::config::TestkitConfig;
use crate::errors::TestkitError;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber writing through the test harness's capture
///
/// `RUST_LOG` wins over the configured filter. A malformed `TDD_TESTKIT_*`
/// value falls back to the default filter and is reported as a warning.
/// Calling this more than once per process is harmless; later calls leave
/// the first subscriber in place.
pub fn init_test_tracing() {
    let (log_filter, config_err) = resolve_log_filter();
    init_test_tracing_with(&log_filter);
    if let Some(err) = config_err {
        warn!(error = %err, "invalid testkit config in environment, using defaults");
    }
}

/// Filter directive from the environment config, or the default plus the
/// error that forced the fallback
fn resolve_log_filter() -> (String, Option<TestkitError>) {
    match TestkitConfig::from_env() {
        Ok(config) => (config.log_filter, None),
        Err(err) => (TestkitConfig::default().log_filter, Some(err)),
    }
}

/// Install a fmt subscriber using `default_directive` when `RUST_LOG` is unset
pub fn init_test_tracing_with(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ENV_DEFAULT_TIMEOUT_MS, ENV_LOG_FILTER};
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_bad_env_config_falls_back_and_reports() {
        std::env::remove_var(ENV_LOG_FILTER);
        std::env::set_var(ENV_DEFAULT_TIMEOUT_MS, "soon");

        let (log_filter, config_err) = resolve_log_filter();
        init_test_tracing();
        std::env::remove_var(ENV_DEFAULT_TIMEOUT_MS);

        assert_eq!(log_filter, TestkitConfig::default().log_filter);
        assert!(matches!(config_err, Some(TestkitError::Config { .. })));
    }

    #[test]
    #[serial]
    fn test_env_filter_is_used_when_config_is_valid() {
        std::env::remove_var(ENV_DEFAULT_TIMEOUT_MS);
        std::env::set_var(ENV_LOG_FILTER, "tdd_testkit=trace");

        let (log_filter, config_err) = resolve_log_filter();
        std::env::remove_var(ENV_LOG_FILTER);

        assert_eq!(log_filter, "tdd_testkit=trace");
        assert!(config_err.is_none());
    }

    #[test]
    #[serial]
    fn test_repeated_init_is_harmless() {
        init_test_tracing();
        init_test_tracing_with("trace");
        tracing::debug!("subscriber installed");
    }
}
