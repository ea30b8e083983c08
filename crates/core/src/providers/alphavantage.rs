use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::holding::InstrumentKind;
use super::traits::QuoteProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage API provider for equity/ETF quotes.
///
/// - **Free tier**: 25 requests/day (across ALL endpoints).
/// - **Requires**: API key (set via settings as "alphavantage").
/// - **Coverage**: 100k+ global equity symbols.
///
/// Returns prices in the instrument's native quote currency — USD for
/// US-listed symbols, HKD for Hong-Kong listings. The holding's quote tag
/// decides how valuation interprets the number.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
        }
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

#[derive(Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "Alpha Vantage"
    }

    fn supported_kinds(&self) -> Vec<InstrumentKind> {
        vec![InstrumentKind::Equity, InstrumentKind::Fund]
    }

    async fn fetch_quote(&self, code: &str) -> Result<Option<f64>, CoreError> {
        let resp: GlobalQuoteResponse = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", &code.to_uppercase()),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Alpha Vantage".into(),
                message: format!("Failed to parse quote for {code}: {e}"),
            })?;

        // Rate-limit notes arrive as a 200 with a "Note" body; treat as an
        // error so the registry falls through to the next provider.
        if let Some(note) = resp.note {
            return Err(CoreError::Api {
                provider: "Alpha Vantage".into(),
                message: note,
            });
        }

        let price_str = match resp.global_quote.and_then(|q| q.price) {
            Some(p) => p,
            // An empty quote block means the symbol is unknown upstream.
            None => return Ok(None),
        };

        let price: f64 = price_str.parse().map_err(|e| CoreError::Api {
            provider: "Alpha Vantage".into(),
            message: format!("Invalid price format for {code}: {e}"),
        })?;

        if !price.is_finite() || price <= 0.0 {
            return Ok(None);
        }
        Ok(Some(price))
    }
}
