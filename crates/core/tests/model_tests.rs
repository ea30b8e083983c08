use chrono::{Duration, NaiveDate, Utc};
use wealth_tracker_core::models::currency::{
    Currency, QuoteCurrency, FALLBACK_HKD_TO_MYR, FALLBACK_USD_TO_HKD, FALLBACK_USD_TO_MYR,
};
use wealth_tracker_core::models::document::FinancialData;
use wealth_tracker_core::models::entry::{Asset, AssetKind, IncomeFrequency};
use wealth_tracker_core::models::group::{GroupFilter, PnlFilter};
use wealth_tracker_core::models::holding::{Holding, InstrumentKind};
use wealth_tracker_core::models::price::PriceCache;
use wealth_tracker_core::models::rates::{RateCache, RateSet, RawRates, RATE_CACHE_TTL_SECS};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Currency
// ═══════════════════════════════════════════════════════════════════

mod currency {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Currency::Myr.to_string(), "MYR");
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Hkd.to_string(), "HKD");
    }

    #[test]
    fn default_is_home_currency() {
        assert_eq!(Currency::default(), Currency::Myr);
    }

    #[test]
    fn serde_uses_iso_codes() {
        assert_eq!(serde_json::to_string(&Currency::Myr).unwrap(), "\"MYR\"");
        assert_eq!(serde_json::to_string(&Currency::Hkd).unwrap(), "\"HKD\"");
        let back: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(back, Currency::Usd);
    }

    #[test]
    fn fallback_constants() {
        assert_eq!(FALLBACK_USD_TO_MYR, 4.7);
        assert_eq!(FALLBACK_HKD_TO_MYR, 0.6);
        assert_eq!(FALLBACK_USD_TO_HKD, 7.8);
    }

    #[test]
    fn quote_currency_defaults_to_usd() {
        assert_eq!(QuoteCurrency::default(), QuoteCurrency::UsdQuoted);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  IncomeFrequency
// ═══════════════════════════════════════════════════════════════════

mod income_frequency {
    use super::*;

    #[test]
    fn monthly_factors() {
        assert_eq!(IncomeFrequency::Weekly.monthly_factor(), 4.33);
        assert_eq!(IncomeFrequency::BiWeekly.monthly_factor(), 2.17);
        assert_eq!(IncomeFrequency::Monthly.monthly_factor(), 1.0);
        assert_eq!(IncomeFrequency::Yearly.monthly_factor(), 1.0 / 12.0);
        assert_eq!(IncomeFrequency::OneTime.monthly_factor(), 0.0);
    }

    #[test]
    fn weekly_100_normalizes_to_433() {
        assert!((100.0 * IncomeFrequency::Weekly.monthly_factor() - 433.0).abs() < 1e-9);
    }

    #[test]
    fn serde_kebab_case() {
        assert_eq!(
            serde_json::to_string(&IncomeFrequency::BiWeekly).unwrap(),
            "\"bi-weekly\""
        );
        assert_eq!(
            serde_json::to_string(&IncomeFrequency::OneTime).unwrap(),
            "\"one-time\""
        );
        let back: IncomeFrequency = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(back, IncomeFrequency::Weekly);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AssetKind
// ═══════════════════════════════════════════════════════════════════

mod asset_kind {
    use super::*;

    #[test]
    fn default_is_current() {
        assert_eq!(AssetKind::default(), AssetKind::Current);
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&AssetKind::Fixed).unwrap(), "\"fixed\"");
        let back: AssetKind = serde_json::from_str("\"current\"").unwrap();
        assert_eq!(back, AssetKind::Current);
    }

    #[test]
    fn missing_kind_defaults_on_deserialize() {
        let json = r#"{
            "id": "9f8b6a1e-0000-4000-8000-000000000001",
            "name": "Savings",
            "category": "Cash",
            "amount": 1000.0,
            "date": "2024-01-01"
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.kind, AssetKind::Current);
        assert_eq!(asset.currency, Currency::Myr);
        assert_eq!(asset.rate_at_entry, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Holding
// ═══════════════════════════════════════════════════════════════════

mod holding {
    use super::*;

    #[test]
    fn new_uppercases_code() {
        let h = Holding::new(
            "tsm",
            10.0,
            100.0,
            QuoteCurrency::UsdQuoted,
            Currency::Usd,
            "tiger",
            InstrumentKind::Equity,
        );
        assert_eq!(h.code, "TSM");
        assert_eq!(h.market_price, None);
        assert_eq!(h.last_updated, None);
    }

    #[test]
    fn cash_sleeve_convention() {
        let h = Holding::cash_sleeve(5000.0, Currency::Myr, "etoro");
        assert_eq!(h.kind, InstrumentKind::CashSleeve);
        assert_eq!(h.quantity, 1.0);
        assert_eq!(h.avg_cost, 5000.0);
        assert_eq!(h.market_price, Some(5000.0));
        assert_eq!(h.currency, Currency::Myr);
    }

    #[test]
    fn crypto_is_always_usd_quoted() {
        let h = Holding::crypto("btc", 0.5, 40000.0, "ledger");
        assert_eq!(h.code, "BTC");
        assert_eq!(h.kind, InstrumentKind::Crypto);
        assert_eq!(h.quote, QuoteCurrency::UsdQuoted);
        assert_eq!(h.currency, Currency::Usd);
    }

    #[test]
    fn instrument_kind_display() {
        assert_eq!(InstrumentKind::Equity.to_string(), "Equity");
        assert_eq!(InstrumentKind::Fund.to_string(), "Fund");
        assert_eq!(InstrumentKind::CashSleeve.to_string(), "Cash");
        assert_eq!(InstrumentKind::Crypto.to_string(), "Crypto");
    }

    #[test]
    fn missing_quote_tag_defaults_to_usd() {
        let json = r#"{
            "id": "9f8b6a1e-0000-4000-8000-000000000002",
            "code": "TSM",
            "quantity": 10.0,
            "avg_cost": 100.0,
            "account": "tiger",
            "kind": "Equity"
        }"#;
        let h: Holding = serde_json::from_str(json).unwrap();
        assert_eq!(h.quote, QuoteCurrency::UsdQuoted);
        assert_eq!(h.market_price, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RateSet / RateCache
// ═══════════════════════════════════════════════════════════════════

mod rates {
    use super::*;

    #[test]
    fn fallback_triple() {
        let now = Utc::now();
        let r = RateSet::fallback(now);
        assert_eq!(r.usd_to_myr, 4.7);
        assert_eq!(r.hkd_to_myr, 0.6);
        assert_eq!(r.usd_to_hkd, 7.8);
    }

    #[test]
    fn from_raw_derives_hkd_to_myr() {
        let now = Utc::now();
        let r = RateSet::from_raw(
            RawRates {
                usd_to_myr: 4.5,
                usd_to_hkd: Some(7.5),
            },
            now,
        );
        assert_eq!(r.usd_to_myr, 4.5);
        assert_eq!(r.usd_to_hkd, 7.5);
        assert!((r.hkd_to_myr - 0.6).abs() < 1e-12);
    }

    #[test]
    fn from_raw_missing_hkd_leg_uses_static() {
        let now = Utc::now();
        let r = RateSet::from_raw(
            RawRates {
                usd_to_myr: 4.68,
                usd_to_hkd: None,
            },
            now,
        );
        assert_eq!(r.usd_to_hkd, 7.8);
        assert!((r.hkd_to_myr - 4.68 / 7.8).abs() < 1e-12);
    }

    #[test]
    fn from_raw_invalid_usd_leg_substitutes_fallback() {
        let now = Utc::now();
        for bad in [f64::NAN, f64::INFINITY, 0.0, -4.5] {
            let r = RateSet::from_raw(
                RawRates {
                    usd_to_myr: bad,
                    usd_to_hkd: Some(7.8),
                },
                now,
            );
            assert_eq!(r.usd_to_myr, 4.7);
            assert!(r.hkd_to_myr.is_finite());
        }
    }

    #[test]
    fn freshness_respects_ttl() {
        let now = Utc::now();
        let r = RateSet::fallback(now);
        assert!(r.is_fresh(now));
        assert!(r.is_fresh(now + Duration::seconds(RATE_CACHE_TTL_SECS - 1)));
        assert!(!r.is_fresh(now + Duration::seconds(RATE_CACHE_TTL_SECS)));
    }

    #[test]
    fn cache_fresh_vs_any() {
        let now = Utc::now();
        let mut cache = RateCache::new();
        assert!(cache.get_fresh(now).is_none());
        assert!(cache.get_any().is_none());

        cache.put(RateSet::fallback(now));
        assert!(cache.get_fresh(now).is_some());

        let later = now + Duration::seconds(RATE_CACHE_TTL_SECS + 1);
        assert!(cache.get_fresh(later).is_none());
        // Stale entry is still available as last-known-good.
        assert!(cache.get_any().is_some());

        cache.clear();
        assert!(cache.get_any().is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PriceCache
// ═══════════════════════════════════════════════════════════════════

mod price_cache {
    use super::*;

    #[test]
    fn get_fresh_is_case_insensitive() {
        let now = Utc::now();
        let mut cache = PriceCache::new();
        cache.put("tsm", 150.0, now);
        assert_eq!(cache.get_fresh("TSM", now), Some(150.0));
        assert_eq!(cache.get_fresh("tsm", now), Some(150.0));
    }

    #[test]
    fn expires_after_five_minutes() {
        let now = Utc::now();
        let mut cache = PriceCache::new();
        cache.put("BTC", 42000.0, now);
        assert_eq!(cache.get_fresh("BTC", now + Duration::seconds(299)), Some(42000.0));
        assert_eq!(cache.get_fresh("BTC", now + Duration::seconds(300)), None);
    }

    #[test]
    fn put_overwrites() {
        let now = Utc::now();
        let mut cache = PriceCache::new();
        cache.put("TSM", 150.0, now);
        cache.put("TSM", 155.0, now);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_fresh("TSM", now), Some(155.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  GroupFilter
// ═══════════════════════════════════════════════════════════════════

mod group_filter {
    use super::*;

    #[test]
    fn default_is_all_pass() {
        let f = GroupFilter::default();
        assert_eq!(f.account, None);
        assert_eq!(f.pnl, PnlFilter::All);
        assert_eq!(f.portion_min, None);
        assert_eq!(f.portion_max, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  FinancialData
// ═══════════════════════════════════════════════════════════════════

mod financial_data {
    use super::*;

    #[test]
    fn default_seeds_category_lists() {
        let data = FinancialData::default();
        assert!(data.asset_categories.contains(&"Cash".to_string()));
        assert!(data.liability_categories.contains(&"Mortgage".to_string()));
        assert!(data.expense_categories.contains(&"Food".to_string()));
        assert!(data.assets.is_empty());
        assert!(data.stock_holdings.is_empty());
    }

    #[test]
    fn migrate_fills_empty_category_lists() {
        let mut data = FinancialData::default();
        data.asset_categories.clear();
        data.expense_categories.clear();
        data.migrate();
        assert!(!data.asset_categories.is_empty());
        assert!(!data.expense_categories.is_empty());
    }

    #[test]
    fn migrate_preserves_custom_categories() {
        let mut data = FinancialData::default();
        data.asset_categories = vec!["Watches".to_string()];
        data.migrate();
        assert_eq!(data.asset_categories, vec!["Watches".to_string()]);
    }

    #[test]
    fn all_holdings_combines_both_collections() {
        let mut data = FinancialData::default();
        data.stock_holdings.push(Holding::new(
            "TSM",
            10.0,
            100.0,
            QuoteCurrency::UsdQuoted,
            Currency::Usd,
            "tiger",
            InstrumentKind::Equity,
        ));
        data.crypto_holdings.push(Holding::crypto("BTC", 0.5, 40000.0, "ledger"));
        let all = data.all_holdings();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].code, "TSM");
        assert_eq!(all[1].code, "BTC");
    }

    #[test]
    fn entry_dates_survive_roundtrip() {
        let asset = Asset::new(
            "Savings",
            "Cash",
            AssetKind::Current,
            1000.0,
            Currency::Myr,
            None,
            d(2024, 3, 15),
        );
        let json = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(back.date, d(2024, 3, 15));
    }
}
