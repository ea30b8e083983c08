use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::rates::RawRates;
use super::traits::RateProvider;

const BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// exchangerate-api.com provider for fiat exchange rates.
///
/// - **Free**: no API key required for basic usage.
/// - **Base**: all rates are quoted against USD in a single call, which
///   yields USD→MYR and USD→HKD together.
pub struct ExchangeRateApiProvider {
    client: Client,
}

impl ExchangeRateApiProvider {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for ExchangeRateApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── exchangerate-api response types ─────────────────────────────────

#[derive(Deserialize)]
struct LatestResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    fn name(&self) -> &str {
        "exchangerate-api"
    }

    async fn fetch_rates(&self) -> Result<RawRates, CoreError> {
        let resp: LatestResponse = self
            .client
            .get(BASE_URL)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "exchangerate-api".into(),
                message: format!("Failed to parse USD rates response: {e}"),
            })?;

        let usd_to_myr = resp.rates.get("MYR").copied().ok_or_else(|| CoreError::Api {
            provider: "exchangerate-api".into(),
            message: "No MYR rate in USD base response".into(),
        })?;

        if !usd_to_myr.is_finite() || usd_to_myr <= 0.0 {
            return Err(CoreError::Api {
                provider: "exchangerate-api".into(),
                message: format!("Invalid USD→MYR rate received: {usd_to_myr}"),
            });
        }

        Ok(RawRates {
            usd_to_myr,
            usd_to_hkd: resp.rates.get("HKD").copied(),
        })
    }
}
