use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::entry::{Asset, Expense, Income, Liability};
use crate::models::rates::RateSet;
use crate::models::report::{MonthlyFlow, NetWorthPoint};
use super::valuation::{value_amount, value_entry};

/// Reconstruct the net-worth series from dated asset and liability
/// entries.
///
/// For every distinct entry date, net worth is the sum of asset values
/// dated on or before that point minus the liability values dated on or
/// before it, using each entry's stored rate (the live rate did not exist
/// at those points in time). The CURRENT stock and crypto portfolio MYR
/// values are then added to every point unconditionally.
///
/// Known limitation: holdings are not date-stamped and no historical
/// price data exists in this design, so their present value is projected
/// backward across the whole series. This is a deliberate approximation,
/// not a reconstruction of true historical holding values.
pub fn net_worth_history(
    assets: &[Asset],
    liabilities: &[Liability],
    current_stock_myr: f64,
    current_crypto_myr: f64,
) -> Vec<NetWorthPoint> {
    let mut dates: Vec<NaiveDate> = assets
        .iter()
        .map(|a| a.date)
        .chain(liabilities.iter().map(|l| l.date))
        .collect();
    dates.sort();
    dates.dedup();

    dates
        .into_iter()
        .map(|date| {
            let asset_total: f64 = assets
                .iter()
                .filter(|a| a.date <= date)
                .map(|a| value_entry(a, None))
                .sum();
            let liability_total: f64 = liabilities
                .iter()
                .filter(|l| l.date <= date)
                .map(|l| value_entry(l, None))
                .sum();

            NetWorthPoint {
                date,
                net_worth: asset_total - liability_total + current_stock_myr + current_crypto_myr,
            }
        })
        .collect()
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Bucket income and expenses into per-month totals.
///
/// Income lands in the bucket of its own entry date at its
/// monthly-normalized equivalent (one-time income contributes zero); it
/// is not spread across months. Expenses land at face (converted) value.
/// Result is ascending by "YYYY-MM" key — lexicographic order is
/// chronological for zero-padded keys.
pub fn monthly_cash_flow_series(
    income: &[Income],
    expenses: &[Expense],
    rates: Option<&RateSet>,
) -> Vec<MonthlyFlow> {
    let mut buckets: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for item in income {
        let monthly = item.amount * item.frequency.monthly_factor();
        let myr = value_amount(monthly, item.currency, item.rate_at_entry, rates);
        buckets.entry(month_key(item.date)).or_insert((0.0, 0.0)).0 += myr;
    }

    for expense in expenses {
        let myr = value_entry(expense, rates);
        buckets.entry(month_key(expense.date)).or_insert((0.0, 0.0)).1 += myr;
    }

    buckets
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyFlow {
            month,
            income,
            expenses,
        })
        .collect()
}
