//! # Keyed latest-value table.
//!
//! [`RecordStore`] keeps exactly one [`Record`] per ticker. Records are never evicted;
//! a provider that stops updating a ticker leaves its last value in place and the
//! staleness shows up through [`age`](crate::records::age).

use std::collections::HashMap;

use super::Record;

/// Owned mapping from ticker to its latest record.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    entries: HashMap<String, Record>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites by key, returning the replaced record.
    pub fn upsert(&mut self, record: Record) -> Option<Record> {
        self.entries.insert(record.ticker.clone(), record)
    }

    /// All records, in no particular order.
    pub fn snapshot(&self) -> Vec<Record> {
        self.entries.values().cloned().collect()
    }

    /// All records ordered by ticker (lexicographic, ascending).
    pub fn sorted_snapshot(&self) -> Vec<Record> {
        let mut records = self.snapshot();
        records.sort_unstable_by(|a, b| a.ticker.cmp(&b.ticker));
        records
    }

    /// Latest record for `ticker`.
    pub fn get(&self, ticker: &str) -> Option<&Record> {
        self.entries.get(ticker)
    }

    /// Number of distinct tickers seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True until the first record arrives.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Cost;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::{HashMap, HashSet};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn rec(ticker: &str, high: f64, secs: i64) -> Record {
        Record {
            ticker: ticker.into(),
            name: format!("{ticker} Inc"),
            cost: Cost {
                low: high - 1.0,
                high,
                currency: "USD".into(),
            },
            observed_at: at(secs),
        }
    }

    #[test]
    fn same_key_is_replaced() {
        let mut store = RecordStore::new();
        assert!(store.upsert(rec("AAPL", 12.0, 1)).is_none());
        let old = store.upsert(rec("AAPL", 13.0, 2)).unwrap();

        assert_eq!(old.observed_at, at(1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("AAPL").unwrap().observed_at, at(2));
        assert_eq!(store.get("AAPL").unwrap().cost.high, 13.0);
    }

    #[test]
    fn one_entry_per_distinct_key_holding_latest() {
        let seq = [
            ("MSFT", 1.0),
            ("AAPL", 2.0),
            ("MSFT", 3.0),
            ("GOOG", 4.0),
            ("AAPL", 5.0),
            ("AAPL", 6.0),
        ];
        let mut store = RecordStore::new();
        let mut latest = HashMap::new();
        for (i, (t, high)) in seq.iter().enumerate() {
            store.upsert(rec(t, *high, i as i64));
            latest.insert(*t, *high);
        }

        let snapshot = store.snapshot();
        let keys: HashSet<_> = snapshot.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(snapshot.len(), latest.len());
        assert_eq!(keys.len(), snapshot.len());
        for r in &snapshot {
            assert_eq!(r.cost.high, latest[r.ticker.as_str()]);
        }
    }

    #[test]
    fn sorted_snapshot_orders_by_ticker() {
        let mut store = RecordStore::new();
        for t in ["MSFT", "AAPL", "GOOG", "AMZN"] {
            store.upsert(rec(t, 1.0, 0));
        }
        let order: Vec<_> = store
            .sorted_snapshot()
            .into_iter()
            .map(|r| r.ticker)
            .collect();
        assert_eq!(order, ["AAPL", "AMZN", "GOOG", "MSFT"]);
    }

    #[test]
    fn empty_store() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
        assert!(store.get("AAPL").is_none());
    }
}
