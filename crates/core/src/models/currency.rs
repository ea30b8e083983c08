use serde::{Deserialize, Serialize};

/// Last-resort exchange rates used when neither a live rate nor a cached
/// rate is available. Conversion must always produce a number — the
/// dashboard has to render something rather than block.
pub const FALLBACK_USD_TO_MYR: f64 = 4.7;
pub const FALLBACK_HKD_TO_MYR: f64 = 0.6;
pub const FALLBACK_USD_TO_HKD: f64 = 7.8;

/// UTC offset of the home timezone (Malaysia, UTC+8). Calendar-month
/// comparisons use the home wall-clock date, not the UTC date.
pub const HOME_UTC_OFFSET_HOURS: i32 = 8;

/// Accounting currency of an entry or holding.
///
/// MYR is the home (reporting) currency — every aggregate total is
/// expressed in it. USD and HKD are the two supported foreign currencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Malaysian Ringgit — the home currency
    #[default]
    #[serde(rename = "MYR")]
    Myr,
    /// US Dollar
    #[serde(rename = "USD")]
    Usd,
    /// Hong Kong Dollar
    #[serde(rename = "HKD")]
    Hkd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Myr => write!(f, "MYR"),
            Currency::Usd => write!(f, "USD"),
            Currency::Hkd => write!(f, "HKD"),
        }
    }
}

/// The currency a market price is literally expressed in, independent of
/// the holding's declared accounting currency.
///
/// Price APIs return USD-denominated quotes for almost everything, but
/// Hong-Kong-listed tickers (e.g. 9988.HK) quote HKD-native. This
/// asymmetry is a genuine upstream contract, so it is carried as an
/// explicit tag on each holding rather than inferred from the declared
/// currency — valuation stays a total function over the tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteCurrency {
    /// Market price arrives in USD (the default for US-listed and crypto)
    #[default]
    UsdQuoted,
    /// Market price arrives in HKD (Hong-Kong-listed instruments)
    HkdQuoted,
}

impl std::fmt::Display for QuoteCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteCurrency::UsdQuoted => write!(f, "USD-quoted"),
            QuoteCurrency::HkdQuoted => write!(f, "HKD-quoted"),
        }
    }
}
