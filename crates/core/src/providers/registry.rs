use std::collections::HashMap;

use crate::models::holding::InstrumentKind;

use super::alphavantage::AlphaVantageProvider;
use super::coincap::CoinCapProvider;
use super::traits::QuoteProvider;
use super::yahoo::YahooFinanceProvider;

/// Registry of all available market-quote providers.
///
/// Routes requests to the correct provider based on `InstrumentKind`,
/// in registration order (earlier = higher priority, later = fallback).
pub struct QuoteProviderRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with all default providers pre-configured.
    pub fn new_with_defaults(api_keys: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();

        // Alpha Vantage — equities/funds, requires API key (primary when set)
        if let Some(key) = api_keys.get("alphavantage") {
            registry.register(Box::new(AlphaVantageProvider::new(key.clone())));
        }

        // Yahoo Finance — equities/funds, no key needed (fallback)
        registry.register(Box::new(YahooFinanceProvider::new()));

        // CoinCap — crypto, no key needed
        registry.register(Box::new(CoinCapProvider::new()));

        registry
    }

    /// Register a new quote provider.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    /// All providers that can quote the given instrument kind, ordered by
    /// registration priority. Used for fallback chains.
    pub fn providers_for(&self, kind: InstrumentKind) -> Vec<&dyn QuoteProvider> {
        self.providers
            .iter()
            .filter(|p| p.supported_kinds().contains(&kind))
            .map(|p| p.as_ref())
            .collect()
    }

    /// Whether at least one provider can quote the given kind.
    pub fn has_provider_for(&self, kind: InstrumentKind) -> bool {
        self.providers
            .iter()
            .any(|p| p.supported_kinds().contains(&kind))
    }
}

impl Default for QuoteProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
