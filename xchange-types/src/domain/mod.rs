//! Domain models for the exchange-rate cache.

pub mod currency_rate;
pub mod freshness;

pub use currency_rate::{CurrencyRate, UNKNOWN_CURRENCY_NAME};
pub use freshness::FreshnessMark;
