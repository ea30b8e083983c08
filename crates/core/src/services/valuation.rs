use crate::models::currency::{
    Currency, QuoteCurrency, FALLBACK_HKD_TO_MYR, FALLBACK_USD_TO_MYR,
};
use crate::models::entry::MonetaryEntry;
use crate::models::holding::{Holding, InstrumentKind};
use crate::models::rates::RateSet;
use crate::models::report::{MarketValue, PnL};

/// Value a single monetary entry in MYR.
///
/// MYR entries are returned unchanged. Foreign entries use, in order of
/// precedence: the live rate from `rates` (live always wins over the
/// stored rate), the entry's own `rate_at_entry`, and finally the static
/// fallback constant. Passing `None` for `rates` selects the stored-rate
/// path — used when reconstructing valuations as they stood at entry
/// time, before any rate fetch occurred.
pub fn value_entry(entry: &impl MonetaryEntry, rates: Option<&RateSet>) -> f64 {
    value_amount(entry.amount(), entry.currency(), entry.rate_at_entry(), rates)
}

/// Same as `value_entry`, over bare fields.
pub fn value_amount(
    amount: f64,
    currency: Currency,
    rate_at_entry: Option<f64>,
    rates: Option<&RateSet>,
) -> f64 {
    match currency {
        Currency::Myr => amount,
        Currency::Usd => {
            let rate = rates
                .map(|r| r.usd_to_myr)
                .or(rate_at_entry)
                .unwrap_or(FALLBACK_USD_TO_MYR);
            amount * rate
        }
        Currency::Hkd => {
            let rate = rates
                .map(|r| r.hkd_to_myr)
                .or(rate_at_entry)
                .unwrap_or(FALLBACK_HKD_TO_MYR);
            amount * rate
        }
    }
}

/// Convert an amount denominated in a declared currency to USD.
fn declared_to_usd(amount: f64, currency: Currency, rates: &RateSet) -> f64 {
    match currency {
        Currency::Usd => amount,
        Currency::Myr => amount / rates.usd_to_myr,
        Currency::Hkd => amount / rates.usd_to_hkd,
    }
}

/// Convert an amount denominated in a declared currency to MYR.
fn declared_to_myr(amount: f64, currency: Currency, rates: &RateSet) -> f64 {
    match currency {
        Currency::Myr => amount,
        Currency::Usd => amount * rates.usd_to_myr,
        Currency::Hkd => amount * rates.hkd_to_myr,
    }
}

/// Normalize a market price to USD according to its quote tag.
///
/// HKD-quoted prices divide by USD→HKD (the rate runs USD→HKD, so going
/// the other way is a division — the classic wrong-direction bug lives
/// here, which is why the tag is explicit).
pub fn quote_price_usd(price: f64, quote: QuoteCurrency, rates: &RateSet) -> f64 {
    match quote {
        QuoteCurrency::UsdQuoted => price,
        QuoteCurrency::HkdQuoted => price / rates.usd_to_hkd,
    }
}

/// Current market value of a holding, in USD and MYR.
///
/// An unpriced holding (no `market_price`) is worth zero in both legs —
/// it never falls back to cost basis, so missing data shows up as a gap
/// instead of being masked.
pub fn value_holding(holding: &Holding, rates: &RateSet) -> MarketValue {
    let price = match holding.market_price {
        Some(p) => p,
        None => return MarketValue::ZERO,
    };

    match holding.kind {
        InstrumentKind::CashSleeve => {
            // Cash: quantity × price is already an amount in the declared
            // currency; no quote-currency step applies.
            let amount = holding.quantity * price;
            MarketValue {
                usd: declared_to_usd(amount, holding.currency, rates),
                myr: declared_to_myr(amount, holding.currency, rates),
            }
        }
        InstrumentKind::Equity | InstrumentKind::Fund | InstrumentKind::Crypto => {
            let usd = holding.quantity * quote_price_usd(price, holding.quote, rates);
            MarketValue {
                usd,
                myr: usd * rates.usd_to_myr,
            }
        }
    }
}

/// Profit & loss of a holding against its cost basis.
///
/// Cost basis (`quantity × avg_cost`, in the declared currency) is
/// normalized to USD before subtracting, so P&L never mixes currencies.
/// Percentage is over the USD basis, 0 when the basis is 0. Unpriced
/// holdings report all-zero P&L.
pub fn value_holding_pnl(holding: &Holding, rates: &RateSet) -> PnL {
    if holding.market_price.is_none() {
        return PnL::default();
    }

    let market_usd = value_holding(holding, rates).usd;
    let cost_basis_usd = declared_to_usd(holding.quantity * holding.avg_cost, holding.currency, rates);

    let usd = market_usd - cost_basis_usd;
    let percentage = if cost_basis_usd > 0.0 {
        (usd / cost_basis_usd) * 100.0
    } else {
        0.0
    };

    PnL {
        usd,
        myr: usd * rates.usd_to_myr,
        percentage,
    }
}
