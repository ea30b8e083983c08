pub mod registry;
pub mod traits;

// API provider implementations
pub mod alphavantage;
pub mod coincap;
pub mod exchange_rate_api;
pub mod yahoo;
