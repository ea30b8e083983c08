use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::Currency;

/// Whether an asset is liquid (current) or illiquid (fixed).
/// Current assets feed the "current allocation" dashboard view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Current,
    Fixed,
}

/// How often an income entry recurs. Determines the monthly-equivalent
/// normalization factor used by the cash-flow aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncomeFrequency {
    Weekly,
    BiWeekly,
    Monthly,
    Yearly,
    /// One-off income is excluded from recurring monthly flow entirely.
    OneTime,
}

impl IncomeFrequency {
    /// Multiplier that converts an amount at this frequency into its
    /// monthly equivalent. Weekly ×4.33 (≈365.25/12/7), bi-weekly ×2.17,
    /// monthly ×1, yearly ÷12, one-time → 0.
    pub fn monthly_factor(self) -> f64 {
        match self {
            IncomeFrequency::Weekly => 4.33,
            IncomeFrequency::BiWeekly => 2.17,
            IncomeFrequency::Monthly => 1.0,
            IncomeFrequency::Yearly => 1.0 / 12.0,
            IncomeFrequency::OneTime => 0.0,
        }
    }
}

/// Common currency-bearing surface of the four entry types, so valuation
/// and aggregation can stay generic over them.
pub trait MonetaryEntry {
    fn amount(&self) -> f64;
    fn currency(&self) -> Currency;
    /// FOREIGN→MYR rate recorded at creation time; fallback only.
    fn rate_at_entry(&self) -> Option<f64>;
}

macro_rules! impl_monetary_entry {
    ($($ty:ty),+) => {
        $(impl MonetaryEntry for $ty {
            fn amount(&self) -> f64 {
                self.amount
            }
            fn currency(&self) -> Currency {
                self.currency
            }
            fn rate_at_entry(&self) -> Option<f64> {
                self.rate_at_entry
            }
        })+
    };
}

impl_monetary_entry!(Asset, Liability, Income, Expense);

/// A user-entered asset (cash, savings, real estate, ...).
///
/// `rate_at_entry` records the FOREIGN→MYR rate valid when the entry was
/// created. It is set if and only if `currency != Myr`, and is only a
/// fallback: a live rate always wins when one is supplied to valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub kind: AssetKind,
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub rate_at_entry: Option<f64>,
    pub date: NaiveDate,
}

/// A user-entered liability (loan, credit card, mortgage, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub rate_at_entry: Option<f64>,
    #[serde(default)]
    pub interest_rate: Option<f64>,
    pub date: NaiveDate,
}

/// A recurring or one-off income entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub source: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub rate_at_entry: Option<f64>,
    pub frequency: IncomeFrequency,
    pub date: NaiveDate,
}

/// A dated expense entry. Expenses are always face-value on their date,
/// never frequency-normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub rate_at_entry: Option<f64>,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl Asset {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        kind: AssetKind,
        amount: f64,
        currency: Currency,
        rate_at_entry: Option<f64>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            kind,
            amount,
            currency,
            rate_at_entry,
            date,
        }
    }
}

impl Liability {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        currency: Currency,
        rate_at_entry: Option<f64>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            amount,
            currency,
            rate_at_entry,
            interest_rate: None,
            date,
        }
    }
}

impl Income {
    pub fn new(
        source: impl Into<String>,
        amount: f64,
        currency: Currency,
        rate_at_entry: Option<f64>,
        frequency: IncomeFrequency,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            amount,
            currency,
            rate_at_entry,
            frequency,
            date,
        }
    }
}

impl Expense {
    pub fn new(
        category: impl Into<String>,
        amount: f64,
        currency: Currency,
        rate_at_entry: Option<f64>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            amount,
            currency,
            rate_at_entry,
            date,
            description: None,
        }
    }
}
