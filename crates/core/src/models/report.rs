use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::holding::InstrumentKind;

/// A market value expressed in both reporting currencies.
/// USD is the common quote basis; MYR is the home display value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketValue {
    pub usd: f64,
    pub myr: f64,
}

impl MarketValue {
    pub const ZERO: MarketValue = MarketValue { usd: 0.0, myr: 0.0 };

    pub fn add(self, other: MarketValue) -> MarketValue {
        MarketValue {
            usd: self.usd + other.usd,
            myr: self.myr + other.myr,
        }
    }
}

/// Profit & loss of a holding or group, in USD and MYR, plus the
/// percentage return over USD cost basis (0 when the basis is 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PnL {
    pub usd: f64,
    pub myr: f64,
    pub percentage: f64,
}

/// Portfolio allocation bucket by instrument kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindAllocation {
    pub kind: InstrumentKind,
    /// Bucket value in MYR
    pub value: f64,
    /// Share of total portfolio MYR value; all zero when the total is zero
    pub percentage: f64,
}

/// Asset allocation bucket by user category (plus the fixed
/// "Stock Portfolio" / "Crypto Portfolio" buckets).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAllocation {
    pub name: String,
    /// Bucket value in MYR
    pub value: f64,
}

/// One point of the reconstructed net-worth series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetWorthPoint {
    pub date: NaiveDate,
    pub net_worth: f64,
}

/// One month of the cash-flow series, keyed "YYYY-MM"
/// (lexicographic order == chronological order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyFlow {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}
