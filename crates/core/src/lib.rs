pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{FixedOffset, NaiveDate, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use errors::CoreError;
use models::{
    account::{Account, AccountView, Deposit},
    currency::Currency,
    document::FinancialData,
    entry::{Asset, AssetKind, Expense, Income, Liability},
    group::GroupedPosition,
    holding::{Holding, InstrumentKind},
    price::PriceCache,
    rates::{RateCache, RateSet},
    report::{CategoryAllocation, KindAllocation, MarketValue, MonthlyFlow, NetWorthPoint},
};
use models::currency::HOME_UTC_OFFSET_HOURS;
use providers::exchange_rate_api::ExchangeRateApiProvider;
use providers::registry::QuoteProviderRegistry;
use services::{
    aggregation, grouping, price_service::PriceService, rate_service::RateService, timeseries,
};
use storage::manager::StorageManager;

/// Today's calendar date in the home timezone. The month-boundary
/// snapshot must follow the user's wall clock, which runs eight hours
/// ahead of UTC.
pub fn home_today() -> NaiveDate {
    match FixedOffset::east_opt(HOME_UTC_OFFSET_HOURS * 3600) {
        Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
        None => Utc::now().date_naive(),
    }
}

/// Entities addressable by id inside the data document.
trait Identified {
    fn entity_id(&self) -> Uuid;
}

macro_rules! impl_identified {
    ($($ty:ty),+) => {
        $(impl Identified for $ty {
            fn entity_id(&self) -> Uuid {
                self.id
            }
        })+
    };
}

impl_identified!(Asset, Liability, Income, Expense, Holding, Account, Deposit);

fn replace_by_id<T: Identified>(
    items: &mut [T],
    replacement: T,
    entity: &'static str,
) -> Result<(), CoreError> {
    let id = replacement.entity_id();
    match items.iter_mut().find(|i| i.entity_id() == id) {
        Some(slot) => {
            *slot = replacement;
            Ok(())
        }
        None => Err(CoreError::NotFound {
            entity,
            id: id.to_string(),
        }),
    }
}

fn remove_by_id<T: Identified>(
    items: &mut Vec<T>,
    id: Uuid,
    entity: &'static str,
) -> Result<T, CoreError> {
    let idx = items
        .iter()
        .position(|i| i.entity_id() == id)
        .ok_or_else(|| CoreError::NotFound {
            entity,
            id: id.to_string(),
        })?;
    Ok(items.remove(idx))
}

fn validate_amount(amount: f64, what: &str) -> Result<(), CoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "{what} must be a finite, non-negative number (got {amount})"
        )));
    }
    Ok(())
}

/// `rate_at_entry` must be set if and only if the entry is foreign.
fn validate_entry_rate(currency: Currency, rate: Option<f64>) -> Result<(), CoreError> {
    match (currency, rate) {
        (Currency::Myr, Some(_)) => Err(CoreError::ValidationError(
            "MYR entries must not carry an entry-time exchange rate".into(),
        )),
        (Currency::Myr, None) => Ok(()),
        (_, None) => Err(CoreError::ValidationError(format!(
            "{currency} entries must record the exchange rate at entry time"
        ))),
        (_, Some(r)) if !r.is_finite() || r <= 0.0 => Err(CoreError::ValidationError(format!(
            "Entry exchange rate must be a finite, positive number (got {r})"
        ))),
        (_, Some(_)) => Ok(()),
    }
}

/// Main entry point for the Wealth Tracker core library.
///
/// Owns the data document and all services needed to operate on it. The
/// rendering layer calls in here for every mutation and every dashboard
/// number; it never computes values itself.
#[must_use]
pub struct WealthTracker {
    data: FinancialData,
    rate_service: RateService,
    price_service: PriceService,
    rate_cache: RateCache,
    price_cache: PriceCache,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for WealthTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WealthTracker")
            .field("assets", &self.data.assets.len())
            .field("liabilities", &self.data.liabilities.len())
            .field("stock_holdings", &self.data.stock_holdings.len())
            .field("crypto_holdings", &self.data.crypto_holdings.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for WealthTracker {
    fn default() -> Self {
        Self::create_new()
    }
}

impl WealthTracker {
    /// Create a brand new empty document with default category lists.
    pub fn create_new() -> Self {
        Self::build(FinancialData::default())
    }

    /// Load an existing document from a JSON string.
    pub fn load_from_str(json: &str) -> Result<Self, CoreError> {
        let data = StorageManager::load_from_str(json)?;
        Ok(Self::build(data))
    }

    /// Serialize the current document to a JSON string.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_string(&mut self) -> Result<String, CoreError> {
        let json = StorageManager::save_to_string(&self.data)?;
        self.dirty = false;
        Ok(json)
    }

    /// Load from a JSON file on disk.
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let data = StorageManager::load_from_file(path)?;
        Ok(Self::build(data))
    }

    /// Save to a JSON file on disk. Clears the unsaved-changes flag.
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.data, path)?;
        self.dirty = false;
        Ok(())
    }

    /// Returns `true` if the document was modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Read-only view of the whole document.
    #[must_use]
    pub fn data(&self) -> &FinancialData {
        &self.data
    }

    // ── Assets ──────────────────────────────────────────────────────

    pub fn add_asset(&mut self, asset: Asset) -> Result<Uuid, CoreError> {
        validate_amount(asset.amount, "Asset amount")?;
        validate_entry_rate(asset.currency, asset.rate_at_entry)?;
        let id = asset.id;
        self.data.assets.push(asset);
        self.dirty = true;
        Ok(id)
    }

    pub fn update_asset(&mut self, asset: Asset) -> Result<(), CoreError> {
        validate_amount(asset.amount, "Asset amount")?;
        validate_entry_rate(asset.currency, asset.rate_at_entry)?;
        replace_by_id(&mut self.data.assets, asset, "Asset")?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_asset(&mut self, id: Uuid) -> Result<(), CoreError> {
        remove_by_id(&mut self.data.assets, id, "Asset")?;
        self.dirty = true;
        Ok(())
    }

    // ── Liabilities ─────────────────────────────────────────────────

    pub fn add_liability(&mut self, liability: Liability) -> Result<Uuid, CoreError> {
        validate_amount(liability.amount, "Liability amount")?;
        validate_entry_rate(liability.currency, liability.rate_at_entry)?;
        let id = liability.id;
        self.data.liabilities.push(liability);
        self.dirty = true;
        Ok(id)
    }

    pub fn update_liability(&mut self, liability: Liability) -> Result<(), CoreError> {
        validate_amount(liability.amount, "Liability amount")?;
        validate_entry_rate(liability.currency, liability.rate_at_entry)?;
        replace_by_id(&mut self.data.liabilities, liability, "Liability")?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_liability(&mut self, id: Uuid) -> Result<(), CoreError> {
        remove_by_id(&mut self.data.liabilities, id, "Liability")?;
        self.dirty = true;
        Ok(())
    }

    // ── Income ──────────────────────────────────────────────────────

    pub fn add_income(&mut self, income: Income) -> Result<Uuid, CoreError> {
        validate_amount(income.amount, "Income amount")?;
        validate_entry_rate(income.currency, income.rate_at_entry)?;
        let id = income.id;
        self.data.income.push(income);
        self.dirty = true;
        Ok(id)
    }

    pub fn update_income(&mut self, income: Income) -> Result<(), CoreError> {
        validate_amount(income.amount, "Income amount")?;
        validate_entry_rate(income.currency, income.rate_at_entry)?;
        replace_by_id(&mut self.data.income, income, "Income")?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_income(&mut self, id: Uuid) -> Result<(), CoreError> {
        remove_by_id(&mut self.data.income, id, "Income")?;
        self.dirty = true;
        Ok(())
    }

    // ── Expenses ────────────────────────────────────────────────────

    pub fn add_expense(&mut self, expense: Expense) -> Result<Uuid, CoreError> {
        validate_amount(expense.amount, "Expense amount")?;
        validate_entry_rate(expense.currency, expense.rate_at_entry)?;
        let id = expense.id;
        self.data.expenses.push(expense);
        self.dirty = true;
        Ok(id)
    }

    pub fn update_expense(&mut self, expense: Expense) -> Result<(), CoreError> {
        validate_amount(expense.amount, "Expense amount")?;
        validate_entry_rate(expense.currency, expense.rate_at_entry)?;
        replace_by_id(&mut self.data.expenses, expense, "Expense")?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<(), CoreError> {
        remove_by_id(&mut self.data.expenses, id, "Expense")?;
        self.dirty = true;
        Ok(())
    }

    // ── Holdings (stock & crypto) ───────────────────────────────────

    fn validate_holding(holding: &Holding) -> Result<(), CoreError> {
        validate_amount(holding.quantity, "Holding quantity")?;
        validate_amount(holding.avg_cost, "Holding average cost")?;
        if holding.code.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Holding instrument code must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn add_stock_holding(&mut self, holding: Holding) -> Result<Uuid, CoreError> {
        Self::validate_holding(&holding)?;
        let id = holding.id;
        self.data.stock_holdings.push(holding);
        self.dirty = true;
        Ok(id)
    }

    pub fn update_stock_holding(&mut self, holding: Holding) -> Result<(), CoreError> {
        Self::validate_holding(&holding)?;
        replace_by_id(&mut self.data.stock_holdings, holding, "Holding")?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_stock_holding(&mut self, id: Uuid) -> Result<(), CoreError> {
        remove_by_id(&mut self.data.stock_holdings, id, "Holding")?;
        self.dirty = true;
        Ok(())
    }

    pub fn add_crypto_holding(&mut self, holding: Holding) -> Result<Uuid, CoreError> {
        Self::validate_holding(&holding)?;
        let id = holding.id;
        self.data.crypto_holdings.push(holding);
        self.dirty = true;
        Ok(id)
    }

    pub fn update_crypto_holding(&mut self, holding: Holding) -> Result<(), CoreError> {
        Self::validate_holding(&holding)?;
        replace_by_id(&mut self.data.crypto_holdings, holding, "Holding")?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_crypto_holding(&mut self, id: Uuid) -> Result<(), CoreError> {
        remove_by_id(&mut self.data.crypto_holdings, id, "Holding")?;
        self.dirty = true;
        Ok(())
    }

    // ── Accounts & Deposits ─────────────────────────────────────────

    pub fn add_trading_account(&mut self, account: Account) -> Result<Uuid, CoreError> {
        validate_amount(account.initial_myr, "Account initial MYR")?;
        validate_amount(account.initial_usd, "Account initial USD")?;
        let id = account.id;
        self.data.trading_accounts.push(account);
        self.dirty = true;
        Ok(id)
    }

    pub fn update_trading_account(&mut self, account: Account) -> Result<(), CoreError> {
        validate_amount(account.initial_myr, "Account initial MYR")?;
        validate_amount(account.initial_usd, "Account initial USD")?;
        replace_by_id(&mut self.data.trading_accounts, account, "Account")?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_trading_account(&mut self, id: Uuid) -> Result<(), CoreError> {
        remove_by_id(&mut self.data.trading_accounts, id, "Account")?;
        self.dirty = true;
        Ok(())
    }

    pub fn add_crypto_account(&mut self, account: Account) -> Result<Uuid, CoreError> {
        validate_amount(account.initial_myr, "Account initial MYR")?;
        validate_amount(account.initial_usd, "Account initial USD")?;
        let id = account.id;
        self.data.crypto_accounts.push(account);
        self.dirty = true;
        Ok(id)
    }

    pub fn update_crypto_account(&mut self, account: Account) -> Result<(), CoreError> {
        validate_amount(account.initial_myr, "Account initial MYR")?;
        validate_amount(account.initial_usd, "Account initial USD")?;
        replace_by_id(&mut self.data.crypto_accounts, account, "Account")?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_crypto_account(&mut self, id: Uuid) -> Result<(), CoreError> {
        remove_by_id(&mut self.data.crypto_accounts, id, "Account")?;
        self.dirty = true;
        Ok(())
    }

    pub fn add_deposit(&mut self, deposit: Deposit) -> Result<Uuid, CoreError> {
        validate_amount(deposit.amount, "Deposit amount")?;
        let id = deposit.id;
        self.data.deposits.push(deposit);
        self.dirty = true;
        Ok(id)
    }

    pub fn update_deposit(&mut self, deposit: Deposit) -> Result<(), CoreError> {
        validate_amount(deposit.amount, "Deposit amount")?;
        replace_by_id(&mut self.data.deposits, deposit, "Deposit")?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_deposit(&mut self, id: Uuid) -> Result<(), CoreError> {
        remove_by_id(&mut self.data.deposits, id, "Deposit")?;
        self.dirty = true;
        Ok(())
    }

    // ── Categories ──────────────────────────────────────────────────

    pub fn add_asset_category(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.data.asset_categories.contains(&name) {
            self.data.asset_categories.push(name);
            self.dirty = true;
        }
    }

    pub fn add_liability_category(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.data.liability_categories.contains(&name) {
            self.data.liability_categories.push(name);
            self.dirty = true;
        }
    }

    pub fn add_expense_category(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.data.expense_categories.contains(&name) {
            self.data.expense_categories.push(name);
            self.dirty = true;
        }
    }

    /// Remove a category from a list. Returns `false` when it was not
    /// present. Existing entries keep their category string either way.
    pub fn remove_asset_category(&mut self, name: &str) -> bool {
        Self::remove_category(&mut self.data.asset_categories, name, &mut self.dirty)
    }

    pub fn remove_liability_category(&mut self, name: &str) -> bool {
        Self::remove_category(&mut self.data.liability_categories, name, &mut self.dirty)
    }

    pub fn remove_expense_category(&mut self, name: &str) -> bool {
        Self::remove_category(&mut self.data.expense_categories, name, &mut self.dirty)
    }

    fn remove_category(categories: &mut Vec<String>, name: &str, dirty: &mut bool) -> bool {
        match categories.iter().position(|c| c == name) {
            Some(idx) => {
                categories.remove(idx);
                *dirty = true;
                true
            }
            None => false,
        }
    }

    // ── Rates & Prices ──────────────────────────────────────────────

    /// Current exchange rates, via the 1-hour cache with fallback.
    /// Infallible: the dashboard always gets a usable triple.
    pub async fn rates(&mut self) -> RateSet {
        self.rate_service
            .get_rates(&mut self.rate_cache, Utc::now())
            .await
    }

    /// Refresh market prices for all stock holdings (equities and funds;
    /// cash sleeves are skipped — their price is their declared value).
    ///
    /// Partial success is expected behavior: codes the providers cannot
    /// serve keep their last known price. Returns the refreshed codes.
    pub async fn refresh_stock_prices(&mut self) -> HashMap<String, f64> {
        let mut refreshed = HashMap::new();
        for kind in [InstrumentKind::Equity, InstrumentKind::Fund] {
            let codes = Self::distinct_codes(&self.data.stock_holdings, kind);
            if codes.is_empty() {
                continue;
            }
            let prices = self
                .price_service
                .refresh_quotes(&mut self.price_cache, &codes, kind, Utc::now())
                .await;
            refreshed.extend(prices);
        }
        self.apply_prices_to(&refreshed, true);
        refreshed
    }

    /// Refresh market prices for all crypto holdings.
    pub async fn refresh_crypto_prices(&mut self) -> HashMap<String, f64> {
        let codes = Self::distinct_codes(&self.data.crypto_holdings, InstrumentKind::Crypto);
        if codes.is_empty() {
            return HashMap::new();
        }
        let prices = self
            .price_service
            .refresh_quotes(&mut self.price_cache, &codes, InstrumentKind::Crypto, Utc::now())
            .await;
        self.apply_prices_to(&prices, false);
        prices
    }

    fn distinct_codes(holdings: &[Holding], kind: InstrumentKind) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for h in holdings.iter().filter(|h| h.kind == kind) {
            let code = h.code.to_uppercase();
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }

    fn apply_prices_to(&mut self, prices: &HashMap<String, f64>, stocks: bool) {
        if prices.is_empty() {
            return;
        }
        let today = home_today();
        let holdings = if stocks {
            &mut self.data.stock_holdings
        } else {
            &mut self.data.crypto_holdings
        };
        let mut changed = false;
        for holding in holdings.iter_mut() {
            if let Some(price) = prices.get(&holding.code.to_uppercase()) {
                holding.market_price = Some(*price);
                holding.last_updated = Some(today);
                changed = true;
            }
        }
        if changed {
            self.dirty = true;
        }
    }

    /// Set an API key for a provider (e.g., "alphavantage").
    /// Rebuilds the provider registry so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.data.settings.api_keys.insert(provider, key);
        let registry = QuoteProviderRegistry::new_with_defaults(&self.data.settings.api_keys);
        self.price_service = PriceService::new(registry);
        self.dirty = true;
    }

    /// Remove a provider API key. Rebuilds the registry on removal.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.data.settings.api_keys.remove(provider).is_some();
        if removed {
            let registry = QuoteProviderRegistry::new_with_defaults(&self.data.settings.api_keys);
            self.price_service = PriceService::new(registry);
            self.dirty = true;
        }
        removed
    }

    // ── Dashboard: totals ───────────────────────────────────────────

    /// Total assets in MYR: plain entries plus both portfolios at market.
    pub async fn total_assets(&mut self) -> f64 {
        let rates = self.rates().await;
        let entries = aggregation::total_entry_value(&self.data.assets, Some(&rates));
        let stocks = aggregation::total_portfolio_value(&self.data.stock_holdings, &rates).myr;
        let crypto = aggregation::total_portfolio_value(&self.data.crypto_holdings, &rates).myr;
        entries + stocks + crypto
    }

    pub async fn total_liabilities(&mut self) -> f64 {
        let rates = self.rates().await;
        aggregation::total_entry_value(&self.data.liabilities, Some(&rates))
    }

    pub async fn net_worth(&mut self) -> f64 {
        self.total_assets().await - self.total_liabilities().await
    }

    pub async fn current_assets(&mut self) -> f64 {
        let rates = self.rates().await;
        aggregation::total_assets_of_kind(&self.data.assets, AssetKind::Current, Some(&rates))
    }

    pub async fn fixed_assets(&mut self) -> f64 {
        let rates = self.rates().await;
        aggregation::total_assets_of_kind(&self.data.assets, AssetKind::Fixed, Some(&rates))
    }

    // ── Dashboard: cash flow ────────────────────────────────────────

    pub async fn monthly_income(&mut self) -> f64 {
        let rates = self.rates().await;
        aggregation::monthly_income(&self.data.income, Some(&rates))
    }

    pub async fn monthly_expenses(&mut self) -> f64 {
        let rates = self.rates().await;
        aggregation::monthly_expenses(&self.data.expenses, Some(&rates), home_today())
    }

    pub async fn monthly_cash_flow(&mut self) -> f64 {
        let rates = self.rates().await;
        aggregation::monthly_cash_flow(
            &self.data.income,
            &self.data.expenses,
            Some(&rates),
            home_today(),
        )
    }

    pub async fn monthly_cash_flow_series(&mut self) -> Vec<MonthlyFlow> {
        let rates = self.rates().await;
        timeseries::monthly_cash_flow_series(&self.data.income, &self.data.expenses, Some(&rates))
    }

    // ── Dashboard: portfolios ───────────────────────────────────────

    pub async fn stock_portfolio_value(&mut self) -> MarketValue {
        let rates = self.rates().await;
        aggregation::total_portfolio_value(&self.data.stock_holdings, &rates)
    }

    pub async fn crypto_portfolio_value(&mut self) -> MarketValue {
        let rates = self.rates().await;
        aggregation::total_portfolio_value(&self.data.crypto_holdings, &rates)
    }

    pub async fn stock_allocation_by_kind(&mut self) -> Vec<KindAllocation> {
        let rates = self.rates().await;
        aggregation::allocation_by_kind(&self.data.stock_holdings, &rates)
    }

    /// Trading-account summaries over the combined stock + crypto
    /// holding set (a brokerage account can hold both).
    pub async fn trading_account_summary(&mut self) -> Vec<AccountView> {
        let rates = self.rates().await;
        let all = self.data.all_holdings();
        aggregation::account_summary(&self.data.trading_accounts, &all, &rates)
    }

    pub async fn crypto_account_summary(&mut self) -> Vec<AccountView> {
        let rates = self.rates().await;
        aggregation::account_summary(&self.data.crypto_accounts, &self.data.crypto_holdings, &rates)
    }

    /// Stock holdings grouped into logical positions by instrument code.
    /// Filtering and sorting are separate pure passes (`services::grouping`).
    pub async fn grouped_stock_positions(&mut self) -> Vec<GroupedPosition> {
        let rates = self.rates().await;
        let total = aggregation::total_portfolio_value(&self.data.stock_holdings, &rates).myr;
        grouping::group_by_code(&self.data.stock_holdings, total, &rates)
    }

    pub fn deposits_by_account(&self) -> HashMap<String, f64> {
        aggregation::deposits_by_account(&self.data.deposits)
    }

    // ── Dashboard: allocation & history ─────────────────────────────

    pub async fn asset_allocation(&mut self, current_only: bool) -> Vec<CategoryAllocation> {
        let rates = self.rates().await;
        let stocks = if self.data.stock_holdings.is_empty() {
            None
        } else {
            Some(aggregation::total_portfolio_value(&self.data.stock_holdings, &rates).myr)
        };
        let crypto = if self.data.crypto_holdings.is_empty() {
            None
        } else {
            Some(aggregation::total_portfolio_value(&self.data.crypto_holdings, &rates).myr)
        };
        aggregation::allocation_by_category(
            &self.data.assets,
            stocks,
            crypto,
            Some(&rates),
            current_only,
        )
    }

    pub async fn net_worth_history(&mut self) -> Vec<NetWorthPoint> {
        let rates = self.rates().await;
        let stocks = aggregation::total_portfolio_value(&self.data.stock_holdings, &rates).myr;
        let crypto = aggregation::total_portfolio_value(&self.data.crypto_holdings, &rates).myr;
        timeseries::net_worth_history(&self.data.assets, &self.data.liabilities, stocks, crypto)
    }

    // ── Provider availability ───────────────────────────────────────

    /// Check if at least one quote provider serves a given instrument kind.
    #[must_use]
    pub fn is_provider_available(&self, kind: InstrumentKind) -> bool {
        self.price_service.has_provider_for(kind)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(data: FinancialData) -> Self {
        let registry = QuoteProviderRegistry::new_with_defaults(&data.settings.api_keys);
        Self {
            data,
            rate_service: RateService::new(Box::new(ExchangeRateApiProvider::new())),
            price_service: PriceService::new(registry),
            rate_cache: RateCache::new(),
            price_cache: PriceCache::new(),
            dirty: false,
        }
    }

    /// Swap in custom rate/quote providers (tests, offline use).
    pub fn with_providers(
        mut self,
        rate_provider: Box<dyn providers::traits::RateProvider>,
        registry: QuoteProviderRegistry,
    ) -> Self {
        self.rate_service = RateService::new(rate_provider);
        self.price_service = PriceService::new(registry);
        self
    }
}
