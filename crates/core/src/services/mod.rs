pub mod aggregation;
pub mod grouping;
pub mod price_service;
pub mod rate_service;
pub mod timeseries;
pub mod valuation;
