//! # XChange Core
//!
//! The exchange-rate service and the pieces it orchestrates.
//!
//! ## Architecture
//!
//! - `service/` - fetch-and-cache pipeline over the network and store ports
//! - `freshness/` - last-refresh timestamp and TTL check
//! - `endpoint/` - routes of the exchange-rate API
//! - `converter/` - client-side conversion arithmetic
//! - `config/` - explicit configuration passed into constructors
//!
//! The service is generic over `N: NetworkClient`, `S: RateStore` and
//! `P: PreferenceStore`, allowing different adapters to be injected.

pub mod config;
pub mod converter;
pub mod endpoint;
pub mod freshness;
pub mod service;


pub use config::{ApiConfig, ServiceConfig};
pub use converter::CurrencyConverter;
pub use endpoint::ExchangeRateEndpoint;
pub use freshness::FreshnessTracker;
pub use service::{ExchangeRateService, merge_rates};
