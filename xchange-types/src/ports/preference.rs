//! Preference store port.

use chrono::{DateTime, Utc};
use std::fmt;

/// Fixed keys understood by preference stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// Time of the last refresh that populated the whole rate cache.
    LatestCurrencyRateRequestTimestamp,
}

impl PreferenceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::LatestCurrencyRateRequestTimestamp => {
                "LATEST_CURRENCY_RATE_REQUEST_TIMESTAMP"
            }
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simple preference storage holding timestamps under fixed keys.
///
/// Like `RateStore`, failures are logged by the adapter and never surfaced.
#[async_trait::async_trait]
pub trait PreferenceStore: Send + Sync + 'static {
    /// Overwrites the timestamp stored under `key`.
    async fn set_timestamp(&self, key: PreferenceKey, value: DateTime<Utc>);

    /// Returns the timestamp stored under `key`, if any.
    async fn get_timestamp(&self, key: PreferenceKey) -> Option<DateTime<Utc>>;

    /// Removes whatever is stored under `key`.
    async fn remove(&self, key: PreferenceKey);
}
