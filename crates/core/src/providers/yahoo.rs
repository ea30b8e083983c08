use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::holding::InstrumentKind;
use super::traits::QuoteProvider;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart-endpoint provider for equity/ETF quotes.
///
/// - **Free**: no API key needed; used as the fallback behind Alpha
///   Vantage's daily request cap.
/// - Reads `regularMarketPrice` from the v8 chart metadata.
///
/// HK-listed codes (e.g. "9988.HK") return HKD-native prices here; the
/// holding's quote tag carries that fact through valuation.
pub struct YahooFinanceProvider {
    client: Client,
}

impl YahooFinanceProvider {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for YahooFinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Yahoo v8 chart response types (only the fields we read) ─────────

#[derive(Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    fn supported_kinds(&self) -> Vec<InstrumentKind> {
        vec![InstrumentKind::Equity, InstrumentKind::Fund]
    }

    async fn fetch_quote(&self, code: &str) -> Result<Option<f64>, CoreError> {
        let symbol = code.to_uppercase();
        let url = format!("{BASE_URL}/{symbol}?interval=1d&range=1d");

        let resp: ChartResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Failed to parse chart response for {symbol}: {e}"),
            })?;

        let price = resp
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .and_then(|r| r.meta.regular_market_price);

        match price {
            Some(p) if p.is_finite() && p > 0.0 => Ok(Some(p)),
            _ => Ok(None),
        }
    }
}
