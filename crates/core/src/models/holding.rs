use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::{Currency, QuoteCurrency};

/// What kind of instrument a holding represents.
/// Determines which price provider serves it and how it is valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Individual equities (TSM, TSLA, 9988.HK, ...)
    Equity,
    /// ETFs and funds
    Fund,
    /// Cash parked inside a brokerage account. Valued at its own declared
    /// amount: `market_price == avg_cost` and `quantity == 1` by convention.
    CashSleeve,
    /// Cryptocurrencies (BTC, ETH, SOL, ...) — always USD-quoted
    Crypto,
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstrumentKind::Equity => write!(f, "Equity"),
            InstrumentKind::Fund => write!(f, "Fund"),
            InstrumentKind::CashSleeve => write!(f, "Cash"),
            InstrumentKind::Crypto => write!(f, "Crypto"),
        }
    }
}

/// A brokerage or wallet position in a single instrument.
///
/// Currency semantics (load-bearing, see `QuoteCurrency`):
/// - `avg_cost` is always denominated in `currency` (the declared
///   accounting currency of the position).
/// - `market_price` is denominated per `quote` — USD for everything except
///   HKD-quoted Hong-Kong listings — independent of `currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: Uuid,

    /// Ticker-like instrument code used to group positions (e.g. "TSM")
    pub code: String,

    /// Optional display name (e.g. "Taiwan Semiconductor")
    #[serde(default)]
    pub name: Option<String>,

    /// Units held, never negative
    pub quantity: f64,

    /// Average purchase price per unit, in `currency`
    pub avg_cost: f64,

    /// Latest market price per unit, in the `quote` currency.
    /// `None` = never priced; the holding contributes zero to
    /// market-value aggregates until a quote arrives.
    #[serde(default)]
    pub market_price: Option<f64>,

    /// Which currency `market_price` arrives in
    #[serde(default)]
    pub quote: QuoteCurrency,

    /// Declared accounting currency of the position
    #[serde(default)]
    pub currency: Currency,

    /// Owning account name (soft reference, matched exactly)
    pub account: String,

    /// USD→MYR rate at entry time, fallback only
    #[serde(default)]
    pub rate_at_entry: Option<f64>,

    pub kind: InstrumentKind,

    /// Date the market price was last refreshed
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

impl Holding {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: impl Into<String>,
        quantity: f64,
        avg_cost: f64,
        quote: QuoteCurrency,
        currency: Currency,
        account: impl Into<String>,
        kind: InstrumentKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into().to_uppercase(),
            name: None,
            quantity,
            avg_cost,
            market_price: None,
            quote,
            currency,
            account: account.into(),
            rate_at_entry: None,
            kind,
            last_updated: None,
        }
    }

    /// A cash sleeve: one "unit" whose price is the cash amount itself,
    /// in the declared currency. Cash does not fluctuate, so market
    /// price and cost coincide by construction.
    pub fn cash_sleeve(
        amount: f64,
        currency: Currency,
        account: impl Into<String>,
    ) -> Self {
        let mut h = Self::new("CASH", 1.0, amount, QuoteCurrency::UsdQuoted, currency, account, InstrumentKind::CashSleeve);
        h.market_price = Some(amount);
        h
    }

    /// Crypto positions are always USD-quoted regardless of account currency.
    pub fn crypto(
        symbol: impl Into<String>,
        quantity: f64,
        avg_cost_usd: f64,
        account: impl Into<String>,
    ) -> Self {
        Self::new(
            symbol,
            quantity,
            avg_cost_usd,
            QuoteCurrency::UsdQuoted,
            Currency::Usd,
            account,
            InstrumentKind::Crypto,
        )
    }
}
