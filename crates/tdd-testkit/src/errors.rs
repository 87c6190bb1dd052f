//! Error types for the testkit
//!
//! Each component reports its own error enum so callers can match on the
//! exact failure. [`TestkitError`] flattens them for test bodies that just
//! want to use `?`.

use std::time::Duration;

/// Outcome of a deadline race that did not produce the operation's value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RaceError<E> {
    /// The deadline elapsed before the operation completed
    #[error("Operation timed out after {after:?}")]
    Timeout {
        /// The deadline that elapsed
        after: Duration,
    },

    /// Neither the operation nor the timer produced an outcome
    #[error("Race finished without a result")]
    NoResult,

    /// The deadline was not strictly positive
    #[error("Invalid timeout: {timeout:?} (must be greater than zero)")]
    InvalidTimeout {
        /// The rejected deadline
        timeout: Duration,
    },

    /// The operation completed first and failed
    #[error("Operation failed: {0}")]
    Operation(E),
}

impl<E> RaceError<E> {
    /// Whether this is a deadline expiry
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The operation's own error, if it completed first and failed
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            Self::Operation(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure returned by a fetch against the stubbed service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError<E> {
    /// No outcome was registered for the requested key
    #[error("No stub registered for {key}")]
    NoStub {
        /// Debug rendering of the requested key
        key: String,
    },

    /// The stub registered for the key is a failure
    #[error("Stubbed failure: {0}")]
    Stubbed(E),
}

impl<E> FetchError<E> {
    /// Create a missing-stub error for a key
    pub fn no_stub(key: impl std::fmt::Debug) -> Self {
        Self::NoStub {
            key: format!("{key:?}"),
        }
    }

    /// Whether the fetch failed because nothing was stubbed
    pub fn is_no_stub(&self) -> bool {
        matches!(self, Self::NoStub { .. })
    }
}

/// Default error value that tests register as a stubbed failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StubFailure {
    /// Description surfaced to the caller
    pub message: String,
}

impl StubFailure {
    /// Create a stub failure with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unified error type for test helpers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestkitError {
    /// A test body or operation exceeded its deadline
    #[error("Timed out after {after:?}")]
    Timeout {
        /// The deadline that elapsed
        after: Duration,
    },

    /// A race produced no outcome; treat as fatal
    #[error("No result produced")]
    NoResult,

    /// Invalid input or configuration
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration failure
        message: String,
    },

    /// The code under test failed
    #[error("Test failed: {message}")]
    Failed {
        /// Error message describing the failure
        message: String,
    },
}

impl TestkitError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a test failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

/// Standard Result type for testkit helpers
pub type Result<T> = std::result::Result<T, TestkitError>;

impl From<RaceError<TestkitError>> for TestkitError {
    fn from(err: RaceError<TestkitError>) -> Self {
        match err {
            RaceError::Timeout { after } => Self::Timeout { after },
            RaceError::NoResult => Self::NoResult,
            RaceError::InvalidTimeout { timeout } => {
                Self::invalid(format!("timeout must be greater than zero, got {timeout:?}"))
            }
            RaceError::Operation(inner) => inner,
        }
    }
}

impl<E: std::fmt::Display> From<FetchError<E>> for TestkitError {
    fn from(err: FetchError<E>) -> Self {
        Self::failed(err.to_string())
    }
}

impl From<toml::de::Error> for TestkitError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("Invalid TOML: {err}"))
    }
}

impl From<std::io::Error> for TestkitError {
    fn from(err: std::io::Error) -> Self {
        Self::config(format!("Failed to read config file: {err}"))
    }
}
