use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::holding::InstrumentKind;
use crate::models::rates::RawRates;

/// Trait abstraction for exchange-rate sources.
///
/// Implementations fetch the USD-base rates; derivation of the HKD→MYR
/// cross rate, caching, and fallback all live in `RateService` so a
/// provider stays a thin HTTP shim.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the latest USD→MYR (and, when available, USD→HKD) rates.
    async fn fetch_rates(&self) -> Result<RawRates, CoreError>;
}

/// Trait abstraction for market-quote sources.
///
/// Each API provider (Alpha Vantage, Yahoo Finance, CoinCap) implements
/// this trait. If an API stops working or changes, only that one
/// implementation is replaced — the rest of the codebase is untouched.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Which instrument kinds this provider can quote.
    fn supported_kinds(&self) -> Vec<InstrumentKind>;

    /// Latest market price for an instrument code, in the instrument's
    /// native quote currency. `Ok(None)` means the upstream has no data
    /// for this code — that is not an error.
    async fn fetch_quote(&self, code: &str) -> Result<Option<f64>, CoreError>;
}
