//! Error types used by the tickerboard runtime, its transports and configuration parsing.
//!
//! This module defines three enums:
//!
//! - [`RuntimeError`]: errors raised by the dashboard runtime itself.
//! - [`TransportError`]: errors raised while connecting to or reading from a provider.
//! - [`ConfigError`]: errors raised by strict provider-list parsing.
//!
//! All of them provide `as_label` (stable snake_case label for logs).

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the dashboard runtime.
///
/// These represent failures in the orchestration itself,
/// such as a shutdown sequence exceeding its grace period.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some sessions did not stop in time.
    #[error("shutdown timeout {grace:?} exceeded; stuck: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of providers whose sessions did not stop in time.
        stuck: Vec<String>,
    },

    /// OS signal handlers could not be installed.
    #[error("failed to install signal handlers: {0}")]
    Signal(#[from] std::io::Error),
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use tickerboard::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
            RuntimeError::Signal(_) => "runtime_signal",
        }
    }
}

/// # Errors produced by a provider connection.
///
/// Every variant is treated as a transient close by the session: it counts
/// toward the reconnect ceiling and never terminates the process.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The provider was configured without a usable endpoint.
    #[error("provider has no endpoint configured")]
    MissingEndpoint,

    /// The connection could not be established.
    #[error("connect failed: {error}")]
    Connect {
        /// The underlying error message.
        error: String,
    },

    /// The established connection failed while reading.
    #[error("protocol error: {error}")]
    Protocol {
        /// The underlying error message.
        error: String,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use tickerboard::TransportError;
    ///
    /// let err = TransportError::Connect { error: "refused".into() };
    /// assert_eq!(err.as_label(), "transport_connect");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::MissingEndpoint => "transport_missing_endpoint",
            TransportError::Connect { .. } => "transport_connect",
            TransportError::Protocol { .. } => "transport_protocol",
        }
    }
}

/// # Errors produced by strict provider-list parsing.
///
/// Lenient parsing never fails; see [`ProviderConfig::parse_lenient`](crate::ProviderConfig::parse_lenient).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An entry has no `=` between name and endpoint.
    #[error("provider entry {entry:?} is missing '='")]
    MissingSeparator {
        /// The offending entry.
        entry: String,
    },

    /// An entry has an empty provider name.
    #[error("provider entry {entry:?} has an empty name")]
    EmptyName {
        /// The offending entry.
        entry: String,
    },

    /// An entry's endpoint is not a valid URL.
    #[error("provider entry {entry:?} has an invalid endpoint: {error}")]
    InvalidEndpoint {
        /// The offending entry.
        entry: String,
        /// The URL parser's message.
        error: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MissingSeparator { .. } => "config_missing_separator",
            ConfigError::EmptyName { .. } => "config_empty_name",
            ConfigError::InvalidEndpoint { .. } => "config_invalid_endpoint",
        }
    }
}
