use chrono::{DateTime, Utc};

use crate::models::rates::{RateCache, RateSet};
use crate::providers::traits::RateProvider;

/// Serves the exchange-rate triple with a time-boxed cache and layered
/// fallback. Never fails: conversion must always proceed with some rate
/// rather than block the dashboard.
///
/// Resolution order:
/// 1. Cached set younger than the TTL (1 hour).
/// 2. Live fetch (HKD legs derived when the upstream omits them).
/// 3. Last successfully cached set, regardless of age.
/// 4. The documented static fallback triple.
pub struct RateService {
    provider: Box<dyn RateProvider>,
}

impl RateService {
    pub fn new(provider: Box<dyn RateProvider>) -> Self {
        Self { provider }
    }

    /// Current rates. `now` is passed in (never read from the wall clock
    /// here) so cache aging is deterministic under test.
    pub async fn get_rates(&self, cache: &mut RateCache, now: DateTime<Utc>) -> RateSet {
        if let Some(fresh) = cache.get_fresh(now) {
            return fresh;
        }

        match self.provider.fetch_rates().await {
            Ok(raw) => {
                let rates = RateSet::from_raw(raw, now);
                cache.put(rates);
                rates
            }
            // Stale cache beats the static fallback: it was at least real once.
            Err(_) => cache.get_any().unwrap_or_else(|| RateSet::fallback(now)),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
