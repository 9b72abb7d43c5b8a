//! # Provider configuration.
//!
//! Providers are configured with a single string of `name=url` pairs separated by `;`:
//!
//! ```text
//! Stocks=wss://stocks.example/feed;Crypto=wss://crypto.example/feed
//! ```
//!
//! Two parsers are offered:
//! - [`ProviderConfig::parse_lenient`] never fails. An entry without `=` becomes a
//!   provider named after the whole entry with no endpoint; an unparseable URL also
//!   yields no endpoint. Such a provider's session fails every attempt and ends exhausted.
//! - [`ProviderConfig::parse_strict`] rejects those entries with a [`ConfigError`].
//!
//! Entries split on the **first** `=`, so query strings in the URL survive.

use std::fmt;

use url::Url;

use crate::error::ConfigError;

/// One configured data provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Display name.
    pub name: String,
    /// Endpoint to dial; `None` when the entry was malformed.
    pub endpoint: Option<Url>,
}

impl ProviderConfig {
    /// Creates a provider with a known endpoint.
    pub fn new(name: impl Into<String>, endpoint: Url) -> Self {
        Self {
            name: name.into(),
            endpoint: Some(endpoint),
        }
    }

    /// Parses the provider list, degrading malformed entries instead of failing.
    ///
    /// # Example
    /// ```
    /// use tickerboard::ProviderConfig;
    ///
    /// let providers = ProviderConfig::parse_lenient("Stocks=wss://a.example;broken");
    /// assert_eq!(providers.len(), 2);
    /// assert_eq!(providers[0].name, "Stocks");
    /// assert!(providers[1].endpoint.is_none());
    /// ```
    pub fn parse_lenient(input: &str) -> Vec<ProviderConfig> {
        input.split(';').map(Self::parse_entry_lenient).collect()
    }

    /// Parses the provider list, rejecting the first malformed entry.
    ///
    /// Empty entries (for example a trailing `;`) are skipped.
    pub fn parse_strict(input: &str) -> Result<Vec<ProviderConfig>, ConfigError> {
        input
            .split(';')
            .filter(|entry| !entry.trim().is_empty())
            .map(Self::parse_entry_strict)
            .collect()
    }

    fn parse_entry_lenient(entry: &str) -> ProviderConfig {
        match entry.split_once('=') {
            Some((name, url)) => {
                let endpoint = Url::parse(url).ok();
                if endpoint.is_none() {
                    tracing::debug!(entry, "provider endpoint is not a valid url");
                }
                ProviderConfig {
                    name: name.to_string(),
                    endpoint,
                }
            }
            None => {
                tracing::debug!(entry, "provider entry has no '='");
                ProviderConfig {
                    name: entry.to_string(),
                    endpoint: None,
                }
            }
        }
    }

    fn parse_entry_strict(entry: &str) -> Result<ProviderConfig, ConfigError> {
        let (name, url) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::MissingSeparator {
                entry: entry.to_string(),
            })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyName {
                entry: entry.to_string(),
            });
        }
        let endpoint = Url::parse(url.trim()).map_err(|e| ConfigError::InvalidEndpoint {
            entry: entry.to_string(),
            error: e.to_string(),
        })?;
        Ok(ProviderConfig::new(name, endpoint))
    }
}

impl fmt::Display for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.endpoint {
            Some(url) => write!(f, "{}={}", self.name, url),
            None => write!(f, "{}=<none>", self.name),
        }
    }
}
