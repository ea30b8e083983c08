pub mod account;
pub mod currency;
pub mod document;
pub mod entry;
pub mod group;
pub mod holding;
pub mod price;
pub mod rates;
pub mod report;
