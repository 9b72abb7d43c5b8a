//! Records and the per-session latest-value store.
//!
//! - [`Record`], [`Cost`] the decoded inbound message
//! - [`RecordStore`] one entry per ticker, upsert only
//! - [`age`], [`format_age`] staleness as a pure function of `(now, observed_at)`

mod record;
mod store;

use std::time::Duration;

use chrono::{DateTime, Utc};

pub use record::{Cost, Record};
pub use store::RecordStore;

/// Time elapsed since `observed_at`; zero when the timestamp is in the future.
#[inline]
pub fn age(now: DateTime<Utc>, observed_at: DateTime<Utc>) -> Duration {
    (now - observed_at).to_std().unwrap_or(Duration::ZERO)
}

/// Renders an age the way the board shows it, e.g. `"1.2s ago"`.
pub fn format_age(age: Duration) -> String {
    format!("{:.1}s ago", age.as_secs_f64())
}
