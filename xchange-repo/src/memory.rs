//! In-memory store adapters.
//!
//! Useful for tests and for shells that do not need the cache to survive a
//! restart. `DashMap` shards serialize access per key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use xchange_types::{CurrencyRate, PreferenceKey, PreferenceStore, RateStore};

// ─────────────────────────────────────────────────────────────────────────────
// Rate store
// ─────────────────────────────────────────────────────────────────────────────

/// Rate cache held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRateStore {
    rates: DashMap<String, CurrencyRate>,
}

impl InMemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `rates` (later duplicates win).
    pub fn with_rates(rates: impl IntoIterator<Item = CurrencyRate>) -> Self {
        let store = Self::new();
        for rate in rates {
            store.rates.insert(rate.code.clone(), rate);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
impl RateStore for InMemoryRateStore {
    async fn create(&self, rate: &CurrencyRate) -> bool {
        match self.rates.entry(rate.code.clone()) {
            Entry::Occupied(_) => {
                tracing::warn!(code = %rate.code, "Failed while creating currency rate: code already exists");
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(rate.clone());
                true
            }
        }
    }

    async fn retrieve(&self) -> Vec<CurrencyRate> {
        let mut rates: Vec<CurrencyRate> =
            self.rates.iter().map(|entry| entry.value().clone()).collect();
        rates.sort_by(|a, b| a.code.cmp(&b.code));
        rates
    }

    async fn update(&self, rate: &CurrencyRate) -> bool {
        match self.rates.get_mut(&rate.code) {
            Some(mut existing) => {
                *existing = rate.clone();
                true
            }
            None => {
                tracing::warn!(code = %rate.code, "Failed while updating currency rate: not found");
                false
            }
        }
    }

    async fn delete(&self, rate: &CurrencyRate) -> bool {
        if self.rates.remove(&rate.code).is_none() {
            tracing::warn!(code = %rate.code, "Failed while deleting currency rate: not found");
            return false;
        }
        true
    }

    async fn exists(&self, rate: &CurrencyRate) -> bool {
        self.rates.contains_key(&rate.code)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preference store
// ─────────────────────────────────────────────────────────────────────────────

/// Preference values held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: DashMap<PreferenceKey, DateTime<Utc>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn set_timestamp(&self, key: PreferenceKey, value: DateTime<Utc>) {
        self.values.insert(key, value);
    }

    async fn get_timestamp(&self, key: PreferenceKey) -> Option<DateTime<Utc>> {
        self.values.get(&key).map(|v| *v.value())
    }

    async fn remove(&self, key: PreferenceKey) {
        self.values.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn euro(rate: f64) -> CurrencyRate {
        CurrencyRate::new("EUR", "Euro", rate)
    }

    #[tokio::test]
    async fn test_create_then_retrieve() {
        let store = InMemoryRateStore::new();
        assert!(store.create(&euro(0.9)).await);
        assert!(store.create(&CurrencyRate::new("AED", "UAE Dirham", 3.67)).await);

        let rates = store.retrieve().await;
        let codes: Vec<&str> = rates.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["AED", "EUR"]);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_code() {
        let store = InMemoryRateStore::new();
        assert!(store.create(&euro(0.9)).await);
        assert!(!store.create(&euro(0.8)).await);

        let rates = store.retrieve().await;
        assert_eq!(rates, vec![euro(0.9)]);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let store = InMemoryRateStore::with_rates([euro(0.9)]);
        let renamed = CurrencyRate::new("EUR", "Euro (EMU)", 0.95);
        assert!(store.update(&renamed).await);
        assert_eq!(store.retrieve().await, vec![renamed]);
    }

    #[tokio::test]
    async fn test_update_missing_is_noop() {
        let store = InMemoryRateStore::new();
        assert!(!store.update(&euro(0.9)).await);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let store = InMemoryRateStore::with_rates([euro(0.9)]);
        assert!(store.exists(&euro(1.0)).await);
        assert!(store.delete(&euro(1.0)).await);
        assert!(!store.exists(&euro(1.0)).await);
        assert!(!store.delete(&euro(1.0)).await);
    }

    #[tokio::test]
    async fn test_preference_set_get_remove() {
        let store = InMemoryPreferenceStore::new();
        let key = PreferenceKey::LatestCurrencyRateRequestTimestamp;
        assert!(store.get_timestamp(key).await.is_none());

        let first = Utc.with_ymd_and_hms(2023, 10, 6, 10, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2023, 10, 6, 11, 0, 0).unwrap();
        store.set_timestamp(key, first).await;
        store.set_timestamp(key, second).await;
        assert_eq!(store.get_timestamp(key).await, Some(second));

        store.remove(key).await;
        assert!(store.get_timestamp(key).await.is_none());
    }
}
