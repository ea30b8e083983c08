use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::account::{Account, Deposit};
use super::entry::{Asset, Expense, Income, Liability};
use super::holding::Holding;

/// User-configurable settings, stored inside the data document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Optional API keys for providers that require them.
    /// Keys: provider name (e.g., "alphavantage"). Values: the key string.
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

fn default_asset_categories() -> Vec<String> {
    [
        "Cash",
        "Savings Account",
        "Checking Account",
        "Investment",
        "Retirement Account",
        "Real Estate",
        "Vehicle",
        "Other",
    ]
    .map(String::from)
    .to_vec()
}

fn default_liability_categories() -> Vec<String> {
    [
        "Credit Card",
        "Personal Loan",
        "Mortgage",
        "Auto Loan",
        "Student Loan",
        "Medical Debt",
        "Other",
    ]
    .map(String::from)
    .to_vec()
}

fn default_expense_categories() -> Vec<String> {
    [
        "Housing",
        "Food",
        "Transportation",
        "Utilities",
        "Healthcare",
        "Entertainment",
        "Shopping",
        "Education",
        "Insurance",
        "Other",
    ]
    .map(String::from)
    .to_vec()
}

/// The whole persisted data document. Loaded and saved as one JSON blob;
/// no partial updates.
///
/// Every collection carries `#[serde(default)]` so that documents written
/// by older versions (missing holdings, accounts, deposits, or category
/// lists) load cleanly — migration fills structure, it never rejects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    #[serde(default)]
    pub income: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub asset_categories: Vec<String>,
    #[serde(default)]
    pub liability_categories: Vec<String>,
    #[serde(default)]
    pub expense_categories: Vec<String>,

    #[serde(default)]
    pub stock_holdings: Vec<Holding>,
    #[serde(default)]
    pub crypto_holdings: Vec<Holding>,
    #[serde(default)]
    pub trading_accounts: Vec<Account>,
    #[serde(default)]
    pub crypto_accounts: Vec<Account>,
    #[serde(default)]
    pub deposits: Vec<Deposit>,

    #[serde(default)]
    pub settings: Settings,
}

impl Default for FinancialData {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            liabilities: Vec::new(),
            income: Vec::new(),
            expenses: Vec::new(),
            asset_categories: default_asset_categories(),
            liability_categories: default_liability_categories(),
            expense_categories: default_expense_categories(),
            stock_holdings: Vec::new(),
            crypto_holdings: Vec::new(),
            trading_accounts: Vec::new(),
            crypto_accounts: Vec::new(),
            deposits: Vec::new(),
            settings: Settings::default(),
        }
    }
}

impl FinancialData {
    /// Fill structural defaults a deserialized document may lack.
    ///
    /// Serde defaults already cover missing collections and missing
    /// per-entry fields (currency → MYR, asset kind → current); what
    /// remains is seeding empty category lists with the stock defaults.
    pub fn migrate(&mut self) {
        if self.asset_categories.is_empty() {
            self.asset_categories = default_asset_categories();
        }
        if self.liability_categories.is_empty() {
            self.liability_categories = default_liability_categories();
        }
        if self.expense_categories.is_empty() {
            self.expense_categories = default_expense_categories();
        }
    }

    /// All holdings across the stock and crypto collections.
    pub fn all_holdings(&self) -> Vec<Holding> {
        let mut all = Vec::with_capacity(self.stock_holdings.len() + self.crypto_holdings.len());
        all.extend(self.stock_holdings.iter().cloned());
        all.extend(self.crypto_holdings.iter().cloned());
        all
    }
}
