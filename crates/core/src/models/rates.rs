use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::currency::{FALLBACK_HKD_TO_MYR, FALLBACK_USD_TO_HKD, FALLBACK_USD_TO_MYR};

/// How long a fetched rate set stays fresh before a re-fetch is attempted.
pub const RATE_CACHE_TTL_SECS: i64 = 3600;

/// The raw result of a rate-provider fetch. The HKD leg may be missing
/// from the upstream response; `RateService` derives it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRates {
    pub usd_to_myr: f64,
    pub usd_to_hkd: Option<f64>,
}

/// The complete exchange-rate triple used by every valuation call.
///
/// `hkd_to_myr` is derived, not fetched: if 1 USD = X MYR and
/// 1 USD = Y HKD, then 1 HKD = X/Y MYR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSet {
    pub usd_to_myr: f64,
    pub hkd_to_myr: f64,
    pub usd_to_hkd: f64,
    pub fetched_at: DateTime<Utc>,
}

impl RateSet {
    /// Documented approximate fallback triple, returned when no fetch has
    /// ever succeeded. Conversion must always proceed with some rate
    /// rather than block the dashboard.
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self {
            usd_to_myr: FALLBACK_USD_TO_MYR,
            hkd_to_myr: FALLBACK_HKD_TO_MYR,
            usd_to_hkd: FALLBACK_USD_TO_HKD,
            fetched_at: now,
        }
    }

    /// Build a full rate set from a raw fetch, deriving the HKD legs.
    ///
    /// Invalid legs (non-finite or non-positive) are substituted with the
    /// static fallback before anything is stored, so a misbehaving
    /// provider can never poison the cache with NaN.
    pub fn from_raw(raw: RawRates, now: DateTime<Utc>) -> Self {
        let usd_to_myr = if raw.usd_to_myr.is_finite() && raw.usd_to_myr > 0.0 {
            raw.usd_to_myr
        } else {
            FALLBACK_USD_TO_MYR
        };
        let usd_to_hkd = match raw.usd_to_hkd {
            Some(r) if r.is_finite() && r > 0.0 => r,
            _ => FALLBACK_USD_TO_HKD,
        };
        Self {
            usd_to_myr,
            hkd_to_myr: usd_to_myr / usd_to_hkd,
            usd_to_hkd,
            fetched_at: now,
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < Duration::seconds(RATE_CACHE_TTL_SECS)
    }
}

/// Explicit rate cache, injected into `RateService` so tests can seed it
/// and drive the clock deterministically. Holds at most the last
/// successfully fetched set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateCache {
    cached: Option<RateSet>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached set if it is younger than the TTL.
    pub fn get_fresh(&self, now: DateTime<Utc>) -> Option<RateSet> {
        self.cached.filter(|r| r.is_fresh(now))
    }

    /// The cached set regardless of age (last-known-good fallback).
    pub fn get_any(&self) -> Option<RateSet> {
        self.cached
    }

    pub fn put(&mut self, rates: RateSet) {
        self.cached = Some(rates);
    }

    pub fn clear(&mut self) {
        self.cached = None;
    }
}
