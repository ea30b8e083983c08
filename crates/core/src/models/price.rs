use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How long a fetched quote stays fresh before a re-fetch is attempted.
pub const PRICE_CACHE_TTL_SECS: i64 = 300;

/// A cached market quote with its fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedQuote {
    pub price: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Session cache of market quotes keyed by uppercased instrument code.
///
/// An explicit injected component (rather than module-level state) so
/// tests can seed it and drive the clock deterministically; `now` is
/// always passed in by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceCache {
    entries: HashMap<String, CachedQuote>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached price if it is younger than the TTL.
    pub fn get_fresh(&self, code: &str, now: DateTime<Utc>) -> Option<f64> {
        self.entries
            .get(&code.to_uppercase())
            .filter(|q| now - q.fetched_at < Duration::seconds(PRICE_CACHE_TTL_SECS))
            .map(|q| q.price)
    }

    pub fn put(&mut self, code: &str, price: f64, now: DateTime<Utc>) {
        self.entries.insert(
            code.to_uppercase(),
            CachedQuote {
                price,
                fetched_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
