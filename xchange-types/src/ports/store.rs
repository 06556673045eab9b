//! Rate cache store port.
//!
//! Adapters (in-memory, SQLite) implement this trait.

use crate::domain::CurrencyRate;

/// Key-value persistence of currency rates keyed by `code`.
///
/// Storage failures are logged and swallowed by the adapter. Mutations
/// return `true` only when they took effect, so callers can tell a full
/// refresh from a partial one without seeing the underlying error.
///
/// A completed mutation is visible to the next `retrieve`.
#[async_trait::async_trait]
pub trait RateStore: Send + Sync + 'static {
    /// Inserts a new record. Returns `false` if the code already exists.
    async fn create(&self, rate: &CurrencyRate) -> bool;

    /// Returns every stored record, sorted by code. Empty on failure.
    async fn retrieve(&self) -> Vec<CurrencyRate>;

    /// Replaces the record with the same code. Returns `false` if absent.
    async fn update(&self, rate: &CurrencyRate) -> bool;

    /// Removes the record with the same code. Returns `false` if absent.
    async fn delete(&self, rate: &CurrencyRate) -> bool;

    /// Returns true when a record with the same code is stored.
    async fn exists(&self, rate: &CurrencyRate) -> bool;
}
