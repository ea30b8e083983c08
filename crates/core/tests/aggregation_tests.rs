// ═══════════════════════════════════════════════════════════════════
// Aggregation Tests — totals, account summaries, allocations, cash flow
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, Utc};
use wealth_tracker_core::models::account::{Account, Deposit};
use wealth_tracker_core::models::currency::{Currency, QuoteCurrency};
use wealth_tracker_core::models::entry::{Asset, AssetKind, Expense, Income, IncomeFrequency};
use wealth_tracker_core::models::holding::{Holding, InstrumentKind};
use wealth_tracker_core::models::rates::RateSet;
use wealth_tracker_core::services::aggregation::{
    account_summary, allocation_by_category, allocation_by_kind, deposits_by_account,
    monthly_cash_flow, monthly_expenses, monthly_income, total_assets_of_kind, total_entry_value,
    total_portfolio_value,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn rates(usd_to_myr: f64, usd_to_hkd: f64) -> RateSet {
    RateSet {
        usd_to_myr,
        hkd_to_myr: usd_to_myr / usd_to_hkd,
        usd_to_hkd,
        fetched_at: Utc::now(),
    }
}

fn myr_asset(name: &str, category: &str, kind: AssetKind, amount: f64) -> Asset {
    Asset::new(name, category, kind, amount, Currency::Myr, None, d(2024, 1, 1))
}

fn priced_equity(code: &str, account: &str, quantity: f64, avg_cost: f64, price: f64) -> Holding {
    let mut h = Holding::new(
        code,
        quantity,
        avg_cost,
        QuoteCurrency::UsdQuoted,
        Currency::Usd,
        account,
        InstrumentKind::Equity,
    );
    h.market_price = Some(price);
    h
}

// ── Entry totals ────────────────────────────────────────────────────

mod entry_totals {
    use super::*;

    #[test]
    fn sums_mixed_currencies_in_myr() {
        let r = rates(4.5, 7.8);
        let assets = vec![
            myr_asset("a", "Cash", AssetKind::Current, 1000.0),
            Asset::new("b", "Cash", AssetKind::Current, 100.0, Currency::Usd, Some(4.0), d(2024, 1, 1)),
        ];
        // Live rate 4.5 wins over the stored 4.0.
        assert_eq!(total_entry_value(&assets, Some(&r)), 1450.0);
    }

    #[test]
    fn empty_slice_is_zero() {
        let assets: Vec<Asset> = Vec::new();
        assert_eq!(total_entry_value(&assets, None), 0.0);
    }

    #[test]
    fn kind_filter_partitions_assets() {
        let assets = vec![
            myr_asset("cash", "Cash", AssetKind::Current, 1000.0),
            myr_asset("house", "Real Estate", AssetKind::Fixed, 500_000.0),
            myr_asset("savings", "Savings Account", AssetKind::Current, 2000.0),
        ];
        assert_eq!(total_assets_of_kind(&assets, AssetKind::Current, None), 3000.0);
        assert_eq!(total_assets_of_kind(&assets, AssetKind::Fixed, None), 500_000.0);
    }
}

// ── Portfolio totals ────────────────────────────────────────────────

mod portfolio_totals {
    use super::*;

    #[test]
    fn sums_both_legs_and_skips_unpriced() {
        let r = rates(4.7, 7.8);
        let holdings = vec![
            priced_equity("TSM", "tiger", 10.0, 100.0, 150.0),
            Holding::new(
                "NEW",
                5.0,
                10.0,
                QuoteCurrency::UsdQuoted,
                Currency::Usd,
                "tiger",
                InstrumentKind::Equity,
            ), // never priced
        ];
        let total = total_portfolio_value(&holdings, &r);
        assert_eq!(total.usd, 1500.0);
        assert_eq!(total.myr, 7050.0);
    }
}

// ── Account summary ─────────────────────────────────────────────────

mod account_summaries {
    use super::*;

    #[test]
    fn matches_holdings_by_exact_name() {
        let r = rates(4.7, 7.8);
        let accounts = vec![Account::new("tiger", 4700.0, 1000.0)];
        let holdings = vec![
            priced_equity("TSM", "tiger", 10.0, 100.0, 150.0),
            priced_equity("TSLA", "etoro", 1.0, 200.0, 250.0), // different account
        ];
        let views = account_summary(&accounts, &holdings, &r);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].current_usd, 1500.0);
        assert_eq!(views[0].current_myr, 7050.0);
        assert_eq!(views[0].pnl_myr, 7050.0 - 4700.0);
        assert!((views[0].pnl_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn account_without_holdings_reports_zero() {
        let r = rates(4.7, 7.8);
        let accounts = vec![Account::new("empty", 1000.0, 0.0)];
        let views = account_summary(&accounts, &[], &r);
        assert_eq!(views[0].current_myr, 0.0);
        assert_eq!(views[0].pnl_myr, -1000.0);
    }

    #[test]
    fn zero_initial_guards_percentage() {
        let r = rates(4.7, 7.8);
        let accounts = vec![Account::new("fresh", 0.0, 0.0)];
        let holdings = vec![priced_equity("TSM", "fresh", 1.0, 100.0, 150.0)];
        let views = account_summary(&accounts, &holdings, &r);
        assert_eq!(views[0].pnl_pct, 0.0);
    }
}

// ── Allocations ─────────────────────────────────────────────────────

mod allocations {
    use super::*;

    #[test]
    fn kind_percentages_sum_to_100() {
        let r = rates(4.7, 7.8);
        let mut cash = Holding::cash_sleeve(1000.0, Currency::Usd, "tiger");
        cash.market_price = Some(1000.0);
        let holdings = vec![
            priced_equity("TSM", "tiger", 10.0, 100.0, 150.0),
            cash,
        ];
        let alloc = allocation_by_kind(&holdings, &r);
        let total_pct: f64 = alloc.iter().map(|a| a.percentage).sum();
        assert!((total_pct - 100.0).abs() < 1e-9);
        // Sorted by value descending.
        assert!(alloc[0].value >= alloc[1].value);
    }

    #[test]
    fn empty_portfolio_gives_zero_percentages() {
        let r = rates(4.7, 7.8);
        let holdings = vec![Holding::new(
            "NEW",
            5.0,
            10.0,
            QuoteCurrency::UsdQuoted,
            Currency::Usd,
            "tiger",
            InstrumentKind::Equity,
        )];
        let alloc = allocation_by_kind(&holdings, &r);
        assert_eq!(alloc.len(), 1);
        assert_eq!(alloc[0].value, 0.0);
        assert_eq!(alloc[0].percentage, 0.0);
    }

    #[test]
    fn category_buckets_merge_same_name() {
        let assets = vec![
            myr_asset("a", "Cash", AssetKind::Current, 1000.0),
            myr_asset("b", "Cash", AssetKind::Current, 500.0),
            myr_asset("c", "Vehicle", AssetKind::Fixed, 30_000.0),
        ];
        let alloc = allocation_by_category(&assets, None, None, None, false);
        assert_eq!(alloc.len(), 2);
        assert_eq!(alloc[0].name, "Vehicle");
        let cash = alloc.iter().find(|b| b.name == "Cash").unwrap();
        assert_eq!(cash.value, 1500.0);
    }

    #[test]
    fn portfolios_appear_as_fixed_buckets() {
        let alloc = allocation_by_category(&[], Some(7050.0), Some(2350.0), None, false);
        assert_eq!(alloc[0].name, "Stock Portfolio");
        assert_eq!(alloc[0].value, 7050.0);
        assert_eq!(alloc[1].name, "Crypto Portfolio");
    }

    #[test]
    fn absent_portfolios_are_omitted() {
        let alloc = allocation_by_category(&[], None, None, None, false);
        assert!(alloc.is_empty());
    }

    #[test]
    fn unpriced_portfolio_shows_as_zero_bucket() {
        // Holdings exist but none has a quote yet: the bucket stays
        // visible at zero rather than disappearing.
        let alloc = allocation_by_category(&[], Some(0.0), None, None, false);
        assert_eq!(alloc.len(), 1);
        assert_eq!(alloc[0].name, "Stock Portfolio");
        assert_eq!(alloc[0].value, 0.0);
    }

    #[test]
    fn current_only_skips_fixed_assets() {
        let assets = vec![
            myr_asset("cash", "Cash", AssetKind::Current, 1000.0),
            myr_asset("house", "Real Estate", AssetKind::Fixed, 500_000.0),
        ];
        let alloc = allocation_by_category(&assets, None, None, None, true);
        assert_eq!(alloc.len(), 1);
        assert_eq!(alloc[0].name, "Cash");
    }
}

// ── Cash flow ───────────────────────────────────────────────────────

mod cash_flow {
    use super::*;

    #[test]
    fn income_normalized_by_frequency() {
        let income = vec![
            Income::new("salary", 5000.0, Currency::Myr, None, IncomeFrequency::Monthly, d(2024, 1, 1)),
            Income::new("gig", 100.0, Currency::Myr, None, IncomeFrequency::Weekly, d(2024, 1, 1)),
            Income::new("bonus", 12000.0, Currency::Myr, None, IncomeFrequency::Yearly, d(2024, 1, 1)),
            Income::new("gift", 999.0, Currency::Myr, None, IncomeFrequency::OneTime, d(2024, 1, 1)),
        ];
        let total = monthly_income(&income, None);
        assert!((total - (5000.0 + 433.0 + 1000.0)).abs() < 1e-9);
    }

    #[test]
    fn foreign_income_converted_after_normalization() {
        let r = rates(4.5, 7.8);
        let income = vec![Income::new(
            "remote job",
            1000.0,
            Currency::Usd,
            Some(4.0),
            IncomeFrequency::Monthly,
            d(2024, 1, 1),
        )];
        assert_eq!(monthly_income(&income, Some(&r)), 4500.0);
    }

    #[test]
    fn expenses_filtered_to_calendar_month() {
        let today = d(2024, 3, 15);
        let expenses = vec![
            Expense::new("Food", 100.0, Currency::Myr, None, d(2024, 3, 1)),
            Expense::new("Food", 200.0, Currency::Myr, None, d(2024, 3, 31)),
            Expense::new("Food", 999.0, Currency::Myr, None, d(2024, 2, 28)),
            Expense::new("Food", 999.0, Currency::Myr, None, d(2023, 3, 15)), // same month, wrong year
        ];
        assert_eq!(monthly_expenses(&expenses, None, today), 300.0);
    }

    #[test]
    fn net_flow_is_income_minus_expenses() {
        let today = d(2024, 3, 15);
        let income = vec![Income::new(
            "salary",
            5000.0,
            Currency::Myr,
            None,
            IncomeFrequency::Monthly,
            d(2024, 1, 1),
        )];
        let expenses = vec![Expense::new("Housing", 1500.0, Currency::Myr, None, d(2024, 3, 1))];
        assert_eq!(monthly_cash_flow(&income, &expenses, None, today), 3500.0);
    }
}

// ── Deposits ────────────────────────────────────────────────────────

mod deposits {
    use super::*;

    #[test]
    fn totals_per_account_name() {
        let deposits = vec![
            Deposit::new("tiger", d(2024, 1, 1), 1000.0),
            Deposit::new("tiger", d(2024, 2, 1), 500.0),
            Deposit::new("etoro", d(2024, 1, 1), 300.0),
        ];
        let totals = deposits_by_account(&deposits);
        assert_eq!(totals["tiger"], 1500.0);
        assert_eq!(totals["etoro"], 300.0);
        assert_eq!(totals.len(), 2);
    }
}
