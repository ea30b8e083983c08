use serde::Serialize;

use super::currency::Currency;
use super::holding::{Holding, InstrumentKind};
use super::report::{MarketValue, PnL};

/// All holdings sharing one instrument code, combined into a single
/// logical position. Derived on demand, never persisted.
///
/// Totals are summed per currency leg (USD and MYR independently), never
/// reconverted from the other leg's sum — avoids rounding drift across
/// mixed-currency members, though groups are expected to be
/// currency-homogeneous in practice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedPosition {
    /// Uppercased instrument code
    pub code: String,
    pub name: Option<String>,
    /// Contributing holdings; single-member groups still carry their one
    /// entry so downstream handling stays uniform.
    pub holdings: Vec<Holding>,
    pub total_quantity: f64,
    pub market_value: MarketValue,
    pub pnl: PnL,
    /// Share of the whole portfolio's MYR value, 0 when the portfolio is 0
    pub portion: f64,
    /// Distinct contributing account names, first-seen order
    pub accounts: Vec<String>,
    pub kind: InstrumentKind,
    /// Quantity-weighted average market price, USD-normalized.
    /// `None` when no member has a price.
    pub weighted_avg_market_price: Option<f64>,
    /// Quantity-weighted average cost in the representative currency.
    pub weighted_avg_cost: Option<f64>,
    /// First member's declared currency. Assumed (not enforced) shared by
    /// all holdings of one code.
    pub currency: Currency,
}

/// Profit/loss predicate for group filtering, on the MYR P&L.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PnlFilter {
    #[default]
    All,
    /// Keep groups with MYR P&L ≥ 0
    Profit,
    /// Keep groups with MYR P&L < 0
    Loss,
}

/// Conjunctive filter over grouped positions. The default value is a
/// no-op: it returns the input unchanged in order and contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupFilter {
    /// Keep only groups whose account set contains this name
    pub account: Option<String>,
    pub pnl: PnlFilter,
    /// Inclusive lower bound on portfolio portion (percent)
    pub portion_min: Option<f64>,
    /// Inclusive upper bound on portfolio portion (percent)
    pub portion_max: Option<f64>,
}

impl GroupFilter {
    pub fn matches(&self, group: &GroupedPosition) -> bool {
        if let Some(account) = &self.account {
            if !group.accounts.iter().any(|a| a == account) {
                return false;
            }
        }
        match self.pnl {
            PnlFilter::All => {}
            PnlFilter::Profit => {
                if group.pnl.myr < 0.0 {
                    return false;
                }
            }
            PnlFilter::Loss => {
                if group.pnl.myr >= 0.0 {
                    return false;
                }
            }
        }
        if let Some(min) = self.portion_min {
            if group.portion < min {
                return false;
            }
        }
        if let Some(max) = self.portion_max {
            if group.portion > max {
                return false;
            }
        }
        true
    }
}

/// Sort order for grouped-position listings. All keys are numeric and
/// sorted stably, so equal-key groups keep their relative order across
/// re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSortKey {
    PnlDesc,
    PnlAsc,
    PortionDesc,
    PortionAsc,
    ValueDesc,
    ValueAsc,
}
