//! # Inbound record type.
//!
//! One JSON object per transport message, no envelope:
//!
//! ```json
//! {"ticker":"AAPL","name":"Apple","cost":{"low":10.0,"high":12.0,"currency":"USD"},"time":"2024-05-01T12:00:00Z"}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bid/ask style price band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    /// Sell side.
    pub low: f64,
    /// Buy side.
    pub high: f64,
    /// ISO currency code as sent by the provider.
    pub currency: String,
}

/// Latest known value for one ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identity key.
    pub ticker: String,
    /// Instrument display name.
    pub name: String,
    /// Current price band.
    pub cost: Cost,
    /// When the provider observed this value.
    #[serde(rename = "time")]
    pub observed_at: DateTime<Utc>,
}

impl Record {
    /// Decodes one transport message.
    pub fn from_json(payload: &str) -> Result<Record, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Store key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.ticker
    }
}
