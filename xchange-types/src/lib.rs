//! # XChange Types
//!
//! Domain types and port traits for the exchange-rate cache pipeline.
//! This crate has no IO of its own - only data structures, the error
//! taxonomy, and the trait contracts that adapters implement.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the workspace:
//! - `domain/` - Currency rate records and the freshness mark
//! - `ports/` - Traits for the network client, stores and clock
//! - `dto/` - Wire shapes returned by the exchange-rate API
//! - `error/` - Network, repository and conversion errors

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyRate, FreshnessMark, UNKNOWN_CURRENCY_NAME};
pub use dto::*;
pub use error::{ConversionError, NetworkError, RepoError};
pub use ports::{
    Clock, Endpoint, HttpMethod, NetworkClient, PreferenceKey, PreferenceStore, RateStore,
    SystemClock,
};
