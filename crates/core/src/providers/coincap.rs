use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::holding::InstrumentKind;
use super::traits::QuoteProvider;

const BASE_URL: &str = "https://api.coincap.io/v2";

/// CoinCap API provider for cryptocurrency prices.
///
/// - **Free**: no API key required, no strict rate limits.
/// - **Data**: 2000+ cryptocurrencies; `priceUsd` is always USD.
///
/// CoinCap uses lowercase ids like "bitcoin", "ethereum". Common symbols
/// are pre-mapped (BTC → bitcoin); unknown ones are resolved via the
/// search endpoint and cached for the session.
pub struct CoinCapProvider {
    client: Client,
    /// Map from uppercase symbol (BTC) to CoinCap asset id (bitcoin).
    symbol_map: Mutex<HashMap<String, String>>,
}

impl CoinCapProvider {
    pub fn new() -> Self {
        let mut symbol_map = HashMap::new();
        let common = [
            ("BTC", "bitcoin"),
            ("ETH", "ethereum"),
            ("USDT", "tether"),
            ("USDC", "usd-coin"),
            ("BNB", "binance-coin"),
            ("XRP", "xrp"),
            ("ADA", "cardano"),
            ("SOL", "solana"),
            ("DOGE", "dogecoin"),
            ("DOT", "polkadot"),
            ("MATIC", "polygon"),
            ("LTC", "litecoin"),
            ("AVAX", "avalanche"),
            ("LINK", "chainlink"),
            ("UNI", "uniswap"),
            ("ATOM", "cosmos"),
            ("XLM", "stellar"),
            ("NEAR", "near-protocol"),
            ("SHIB", "shiba-inu"),
            ("TRX", "tron"),
            ("AAVE", "aave"),
            ("FIL", "filecoin"),
            ("XMR", "monero"),
        ];
        for (sym, id) in common {
            symbol_map.insert(sym.to_string(), id.to_string());
        }

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            symbol_map: Mutex::new(symbol_map),
        }
    }

    /// Resolve a symbol like "BTC" to a CoinCap id, searching the API for
    /// symbols not in the map and caching the answer.
    async fn resolve_id(&self, symbol: &str) -> Result<Option<String>, CoreError> {
        let upper = symbol.to_uppercase();
        {
            let map = self.symbol_map.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(id) = map.get(&upper) {
                return Ok(Some(id.clone()));
            }
        }

        let url = format!("{BASE_URL}/assets?search={upper}&limit=5");
        let resp: AssetsSearchResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("Failed to parse search response for {upper}: {e}"),
            })?;

        let id = resp
            .data
            .into_iter()
            .find(|a| a.symbol.eq_ignore_ascii_case(&upper))
            .map(|a| a.id);

        if let Some(id) = &id {
            let mut map = self.symbol_map.lock().unwrap_or_else(|e| e.into_inner());
            map.insert(upper, id.clone());
        }
        Ok(id)
    }
}

impl Default for CoinCapProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinCap API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct AssetsSearchResponse {
    data: Vec<AssetSummary>,
}

#[derive(Deserialize)]
struct AssetSummary {
    id: String,
    symbol: String,
}

#[derive(Deserialize)]
struct AssetResponse {
    data: AssetData,
}

#[derive(Deserialize)]
struct AssetData {
    #[serde(rename = "priceUsd")]
    price_usd: String,
}

#[async_trait]
impl QuoteProvider for CoinCapProvider {
    fn name(&self) -> &str {
        "CoinCap"
    }

    fn supported_kinds(&self) -> Vec<InstrumentKind> {
        vec![InstrumentKind::Crypto]
    }

    async fn fetch_quote(&self, code: &str) -> Result<Option<f64>, CoreError> {
        let id = match self.resolve_id(code).await? {
            Some(id) => id,
            None => return Ok(None),
        };

        let url = format!("{BASE_URL}/assets/{id}");
        let resp: AssetResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("Failed to parse asset response for {code}: {e}"),
            })?;

        let price: f64 = resp.data.price_usd.parse().map_err(|e| CoreError::Api {
            provider: "CoinCap".into(),
            message: format!("Invalid price format for {code}: {e}"),
        })?;

        if !price.is_finite() || price <= 0.0 {
            return Ok(None);
        }
        Ok(Some(price))
    }
}
