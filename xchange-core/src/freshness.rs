//! Freshness tracking for the rate cache.

use chrono::{DateTime, Utc};

use xchange_types::{FreshnessMark, PreferenceKey, PreferenceStore};

const FRESHNESS_KEY: PreferenceKey = PreferenceKey::LatestCurrencyRateRequestTimestamp;

/// Keeps the last-refresh timestamp in a preference store.
pub struct FreshnessTracker<P: PreferenceStore> {
    prefs: P,
}

impl<P: PreferenceStore> FreshnessTracker<P> {
    pub fn new(prefs: P) -> Self {
        Self { prefs }
    }

    /// Returns a reference to the underlying preference store.
    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    /// Records `now` as the end of a full refresh, overwriting any previous mark.
    pub async fn stamp(&self, now: DateTime<Utc>) {
        self.prefs.set_timestamp(FRESHNESS_KEY, now).await;
    }

    pub async fn last_stamp(&self) -> Option<FreshnessMark> {
        self.prefs
            .get_timestamp(FRESHNESS_KEY)
            .await
            .map(FreshnessMark::new)
    }

    /// False without a stamp; otherwise true while fewer than `ttl_minutes`
    /// whole minutes have elapsed.
    pub async fn is_valid(&self, now: DateTime<Utc>, ttl_minutes: i64) -> bool {
        match self.last_stamp().await {
            Some(mark) => mark.is_within(now, ttl_minutes),
            None => false,
        }
    }

    pub async fn clear(&self) {
        self.prefs.remove(FRESHNESS_KEY).await;
    }
}
