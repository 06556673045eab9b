//! # XChange Repository
//!
//! Concrete store implementations (adapters) for the exchange-rate cache.
//! Every adapter implements `RateStore` and `PreferenceStore` from
//! `xchange-types`, logging and swallowing its own storage failures.
//!
//! - `memory` - process-local stores backed by `dashmap`, always available
//! - `sqlite` - file-backed stores behind the `sqlite` feature

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;


pub use memory::{InMemoryPreferenceStore, InMemoryRateStore};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqlitePreferenceStore, SqliteRateStore};

/// Build and initialize both SQLite stores from a database URL.
///
/// This function:
/// 1. Creates the parent directory of an on-disk database if needed
/// 2. Connects and runs migrations
/// 3. Returns a rate store and a preference store sharing one pool
///
/// # Examples
///
/// ```ignore
/// let (rates, prefs) = build_sqlite_stores("sqlite://xchange.db?mode=rwc").await?;
/// ```
#[cfg(feature = "sqlite")]
pub async fn build_sqlite_stores(
    database_url: &str,
) -> anyhow::Result<(SqliteRateStore, SqlitePreferenceStore)> {
    let pool = sqlite::connect(database_url).await?;
    Ok((
        SqliteRateStore::new(pool.clone()),
        SqlitePreferenceStore::new(pool),
    ))
}
