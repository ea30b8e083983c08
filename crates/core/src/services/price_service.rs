use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::holding::InstrumentKind;
use crate::models::price::PriceCache;
use crate::providers::registry::QuoteProviderRegistry;

/// Delay between consecutive quote fetches in a batch refresh, to respect
/// upstream rate limits.
const BATCH_FETCH_DELAY_MS: u64 = 200;

/// Fetches market quotes from API providers with caching and fallback.
///
/// Providers are tried in registry order; one provider's failure falls
/// through to the next. When every provider fails or has no data, the
/// result is `None` — callers proceed and the holding keeps its last
/// stored price.
pub struct PriceService {
    registry: QuoteProviderRegistry,
}

impl PriceService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    /// Whether at least one provider can quote the given kind.
    pub fn has_provider_for(&self, kind: InstrumentKind) -> bool {
        self.registry.has_provider_for(kind)
    }

    /// Provider names available for the given kind, in fallback order.
    pub fn provider_names(&self, kind: InstrumentKind) -> Vec<String> {
        self.registry
            .providers_for(kind)
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Latest quote for an instrument code, cache-first (5-minute TTL).
    ///
    /// `None` means no provider has data — not an error, the caller must
    /// proceed without it. Cash sleeves never reach this path: their
    /// price is their own declared value.
    pub async fn get_quote(
        &self,
        cache: &mut PriceCache,
        code: &str,
        kind: InstrumentKind,
        now: DateTime<Utc>,
    ) -> Option<f64> {
        if let Some(price) = cache.get_fresh(code, now) {
            return Some(price);
        }

        let providers = self.registry.providers_for(kind);
        for provider in providers {
            match provider.fetch_quote(code).await {
                Ok(Some(price)) => {
                    cache.put(code, price, now);
                    return Some(price);
                }
                // No data from this provider — try the next one.
                Ok(None) => continue,
                Err(_) => continue,
            }
        }
        None
    }

    /// Refresh quotes for many codes sequentially with a fixed inter-call
    /// delay. A failure on one code never aborts the batch: the returned
    /// map may be a strict subset of the requested codes, and untouched
    /// codes simply keep their prior prices.
    pub async fn refresh_quotes(
        &self,
        cache: &mut PriceCache,
        codes: &[String],
        kind: InstrumentKind,
        now: DateTime<Utc>,
    ) -> HashMap<String, f64> {
        let mut prices = HashMap::new();

        for (i, code) in codes.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(Duration::from_millis(BATCH_FETCH_DELAY_MS)).await;
            }
            if let Some(price) = self.get_quote(cache, code, kind, now).await {
                prices.insert(code.to_uppercase(), price);
            }
        }

        prices
    }

    /// Fetch a single quote bypassing the cache read (still writes back).
    /// Used by explicit user-triggered refreshes.
    pub async fn force_quote(
        &self,
        cache: &mut PriceCache,
        code: &str,
        kind: InstrumentKind,
        now: DateTime<Utc>,
    ) -> Result<Option<f64>, CoreError> {
        let providers = self.registry.providers_for(kind);
        if providers.is_empty() {
            return Err(CoreError::NoProvider(kind.to_string()));
        }

        let mut last_error = None;
        for provider in providers {
            match provider.fetch_quote(code).await {
                Ok(Some(price)) => {
                    cache.put(code, price, now);
                    return Ok(Some(price));
                }
                Ok(None) => continue,
                Err(e) => {
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}
