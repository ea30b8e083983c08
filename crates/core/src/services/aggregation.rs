use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::models::account::{Account, AccountView, Deposit};
use crate::models::entry::{Asset, AssetKind, Expense, Income};
use crate::models::entry::MonetaryEntry;
use crate::models::holding::{Holding, InstrumentKind};
use crate::models::rates::RateSet;
use crate::models::report::{CategoryAllocation, KindAllocation, MarketValue};
use super::valuation::{value_entry, value_holding};

/// Sum of entry values in MYR. Pure, order-independent, O(n).
pub fn total_entry_value(entries: &[impl MonetaryEntry], rates: Option<&RateSet>) -> f64 {
    entries.iter().map(|e| value_entry(e, rates)).sum()
}

/// Total of assets with the given kind (current vs fixed), in MYR.
pub fn total_assets_of_kind(assets: &[Asset], kind: AssetKind, rates: Option<&RateSet>) -> f64 {
    assets
        .iter()
        .filter(|a| a.kind == kind)
        .map(|a| value_entry(a, rates))
        .sum()
}

/// Sum of holding market values across a collection.
/// Unpriced holdings contribute zero (see `value_holding`).
pub fn total_portfolio_value(holdings: &[Holding], rates: &RateSet) -> MarketValue {
    holdings
        .iter()
        .fold(MarketValue::ZERO, |acc, h| acc.add(value_holding(h, rates)))
}

/// Per-account summary: current values recomputed from the holdings that
/// reference the account by exact name match, with P&L against the
/// account's initial MYR funding.
///
/// Accounts with no matching holdings report zero current value.
pub fn account_summary(
    accounts: &[Account],
    holdings: &[Holding],
    rates: &RateSet,
) -> Vec<AccountView> {
    accounts
        .iter()
        .map(|account| {
            let current = holdings
                .iter()
                .filter(|h| h.account == account.name)
                .fold(MarketValue::ZERO, |acc, h| acc.add(value_holding(h, rates)));

            let pnl_myr = current.myr - account.initial_myr;
            let pnl_pct = if account.initial_myr > 0.0 {
                (pnl_myr / account.initial_myr) * 100.0
            } else {
                0.0
            };

            AccountView {
                account: account.clone(),
                current_myr: current.myr,
                current_usd: current.usd,
                pnl_myr,
                pnl_pct,
            }
        })
        .collect()
}

/// Portfolio allocation by instrument kind, as a share of the total MYR
/// portfolio value. When the total is zero every percentage is zero
/// (division guarded — the dashboard never sees NaN). Sorted by value
/// descending.
pub fn allocation_by_kind(holdings: &[Holding], rates: &RateSet) -> Vec<KindAllocation> {
    let total = total_portfolio_value(holdings, rates).myr;

    let mut by_kind: Vec<(InstrumentKind, f64)> = Vec::new();
    for holding in holdings {
        let value = value_holding(holding, rates).myr;
        match by_kind.iter_mut().find(|(k, _)| *k == holding.kind) {
            Some((_, v)) => *v += value,
            None => by_kind.push((holding.kind, value)),
        }
    }

    let mut allocations: Vec<KindAllocation> = by_kind
        .into_iter()
        .map(|(kind, value)| KindAllocation {
            kind,
            value,
            percentage: if total > 0.0 { (value / total) * 100.0 } else { 0.0 },
        })
        .collect();

    allocations.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    allocations
}

/// Asset allocation by user category, with the stock and crypto
/// portfolios appearing as their own fixed buckets. Sorted by value
/// descending. `current_only` restricts plain assets to the liquid kind
/// (stock and crypto are considered liquid either way).
///
/// `stock_myr` / `crypto_myr` are `None` when the portfolio holds
/// nothing at all. A portfolio that exists but is entirely unpriced
/// passes `Some(0.0)` and shows up as a zero bucket — missing price
/// data stays visible instead of vanishing from the chart.
pub fn allocation_by_category(
    assets: &[Asset],
    stock_myr: Option<f64>,
    crypto_myr: Option<f64>,
    rates: Option<&RateSet>,
    current_only: bool,
) -> Vec<CategoryAllocation> {
    let mut buckets: Vec<CategoryAllocation> = Vec::new();
    let mut add = |name: &str, value: f64| {
        match buckets.iter_mut().find(|b| b.name == name) {
            Some(b) => b.value += value,
            None => buckets.push(CategoryAllocation {
                name: name.to_string(),
                value,
            }),
        }
    };

    for asset in assets {
        if current_only && asset.kind != AssetKind::Current {
            continue;
        }
        add(&asset.category, value_entry(asset, rates));
    }
    if let Some(myr) = stock_myr {
        add("Stock Portfolio", myr);
    }
    if let Some(myr) = crypto_myr {
        add("Crypto Portfolio", myr);
    }

    buckets.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    buckets
}

/// Monthly-equivalent income in MYR: each entry's amount is normalized by
/// its frequency factor (weekly ×4.33, bi-weekly ×2.17, yearly ÷12,
/// one-time → 0) before currency conversion.
pub fn monthly_income(income: &[Income], rates: Option<&RateSet>) -> f64 {
    income
        .iter()
        .map(|item| {
            let monthly = item.amount * item.frequency.monthly_factor();
            super::valuation::value_amount(monthly, item.currency, item.rate_at_entry, rates)
        })
        .sum()
}

/// Expenses falling in `today`'s calendar month (year+month equality), in
/// MYR. A point-in-time snapshot, not a trailing-30-day window.
pub fn monthly_expenses(expenses: &[Expense], rates: Option<&RateSet>, today: NaiveDate) -> f64 {
    expenses
        .iter()
        .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
        .map(|e| value_entry(e, rates))
        .sum()
}

/// Net recurring cash flow for the current month.
pub fn monthly_cash_flow(
    income: &[Income],
    expenses: &[Expense],
    rates: Option<&RateSet>,
    today: NaiveDate,
) -> f64 {
    monthly_income(income, rates) - monthly_expenses(expenses, rates, today)
}

/// Total MYR deposited per account name.
pub fn deposits_by_account(deposits: &[Deposit]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for deposit in deposits {
        *totals.entry(deposit.account.clone()).or_insert(0.0) += deposit.amount;
    }
    totals
}
