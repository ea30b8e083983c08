use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A brokerage account or crypto wallet.
///
/// Only the name and initial funding are stored. Current values are
/// recomputed from the live holding set on every aggregation pass —
/// they are never persisted authoritatively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    /// Account name (etoro, tiger, futu, ledger, ...). Holdings reference
    /// this by exact string match.
    pub name: String,
    /// Value at account opening, in MYR
    pub initial_myr: f64,
    /// Value at account opening, in USD
    pub initial_usd: f64,
}

impl Account {
    pub fn new(name: impl Into<String>, initial_myr: f64, initial_usd: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            initial_myr,
            initial_usd,
        }
    }
}

/// Account plus its recomputed current values and P&L. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub account: Account,
    pub current_myr: f64,
    pub current_usd: f64,
    pub pnl_myr: f64,
    /// 0 when the initial MYR value is 0 (division guarded)
    pub pnl_pct: f64,
}

/// A cash deposit into an account, in MYR, with optional foreign-leg
/// amounts recorded for reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: Uuid,
    pub account: String,
    pub date: NaiveDate,
    /// Amount in MYR
    pub amount: f64,
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub sgd: Option<f64>,
    #[serde(default)]
    pub aud: Option<f64>,
}

impl Deposit {
    pub fn new(account: impl Into<String>, date: NaiveDate, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            account: account.into(),
            date,
            amount,
            usd: None,
            sgd: None,
            aud: None,
        }
    }
}
