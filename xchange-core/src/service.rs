//! Exchange Rate Service
//!
//! Orchestrates the fetch-and-cache pipeline through the network, store and
//! preference ports. Contains NO infrastructure logic.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use xchange_types::{
    Clock, CurrencyDirectory, CurrencyRate, NetworkClient, NetworkError, PreferenceStore,
    RateStore, RatesResponse, SystemClock, UsageResponse,
};

use crate::config::{ApiConfig, ServiceConfig};
use crate::endpoint::ExchangeRateEndpoint;
use crate::freshness::FreshnessTracker;

/// Application service for exchange rates.
///
/// Generic over the network client and both stores; adapters are injected
/// at construction. Safe to share across tasks.
pub struct ExchangeRateService<N, S, P>
where
    N: NetworkClient,
    S: RateStore,
    P: PreferenceStore,
{
    network: N,
    store: S,
    freshness: FreshnessTracker<P>,
    api: ApiConfig,
    config: ServiceConfig,
    clock: Arc<dyn Clock>,
    // Held for the whole remote refresh so overlapping callers fetch once.
    refresh: Mutex<()>,
}

impl<N, S, P> ExchangeRateService<N, S, P>
where
    N: NetworkClient,
    S: RateStore,
    P: PreferenceStore,
{
    /// Creates a new service using the system clock.
    pub fn new(network: N, store: S, prefs: P, api: ApiConfig, config: ServiceConfig) -> Self {
        Self {
            network,
            store,
            freshness: FreshnessTracker::new(prefs),
            api,
            config,
            clock: Arc::new(SystemClock),
            refresh: Mutex::new(()),
        }
    }

    /// Replaces the clock used for freshness checks and stamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn freshness(&self) -> &FreshnessTracker<P> {
        &self.freshness
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Cached pipeline
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the full rate list, from cache when fresh and non-empty.
    ///
    /// On a miss both remote calls must succeed; any failure is returned
    /// unchanged and leaves the store and the freshness mark untouched.
    /// A successful refresh leaves the store holding exactly the merged set.
    pub async fn fetch_currency_rates(&self) -> Result<Vec<CurrencyRate>, NetworkError> {
        if let Some(cached) = self.cached_rates().await {
            return Ok(cached);
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(cached) = self.cached_rates().await {
            return Ok(cached);
        }

        tracing::info!("Rate cache miss, fetching from remote");

        let (latest, directory) =
            tokio::try_join!(self.fetch_latest_rates(), self.fetch_currencies()).map_err(|e| {
                tracing::warn!(error = %e, "Failed while fetching currency rates");
                e
            })?;

        let merged = merge_rates(latest.rates.unwrap_or_default(), &directory);
        let failed = self.persist(&merged).await;

        if failed > 0 {
            tracing::warn!(
                failed,
                total = merged.len(),
                "Rate cache partially updated, freshness not stamped"
            );
        } else if merged.is_empty() {
            tracing::warn!("Upstream returned no rates, freshness not stamped");
        } else {
            self.freshness.stamp(self.clock.now()).await;
            tracing::info!(count = merged.len(), "Rate cache refreshed");
        }

        Ok(merged)
    }

    /// Drops every cached record and the freshness mark.
    pub async fn invalidate_cache(&self) {
        let _guard = self.refresh.lock().await;
        for rate in self.store.retrieve().await {
            self.store.delete(&rate).await;
        }
        self.freshness.clear().await;
        tracing::info!("Rate cache invalidated");
    }

    async fn cached_rates(&self) -> Option<Vec<CurrencyRate>> {
        let now = self.clock.now();
        if !self
            .freshness
            .is_valid(now, self.config.cache_ttl_minutes)
            .await
        {
            return None;
        }

        let cached = self.store.retrieve().await;
        if cached.is_empty() {
            return None;
        }

        tracing::debug!(count = cached.len(), "Serving rates from cache");
        Some(cached)
    }

    /// Upserts every record and prunes codes the upstream no longer returns.
    /// Returns how many writes did not take effect.
    async fn persist(&self, rates: &[CurrencyRate]) -> usize {
        let mut failed = 0;
        for rate in rates {
            let ok = if self.store.exists(rate).await {
                self.store.update(rate).await
            } else {
                self.store.create(rate).await
            };
            if !ok {
                failed += 1;
            }
        }

        // An empty upstream answer keeps the previous cache around
        if rates.is_empty() {
            return failed;
        }

        let retired: Vec<CurrencyRate> = self
            .store
            .retrieve()
            .await
            .into_iter()
            .filter(|stored| !rates.iter().any(|r| r.code == stored.code))
            .collect();
        for rate in &retired {
            if !self.store.delete(rate).await {
                failed += 1;
            }
        }
        if !retired.is_empty() {
            tracing::debug!(count = retired.len(), "Pruned retired currency rates");
        }

        failed
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Remote calls
    // ─────────────────────────────────────────────────────────────────────────────

    /// Fetches the latest rates straight from the API.
    pub async fn fetch_latest_rates(&self) -> Result<RatesResponse, NetworkError> {
        self.network
            .request(&ExchangeRateEndpoint::Latest.to_endpoint(&self.api))
            .await
    }

    /// Fetches the rates published at the end of `date`.
    pub async fn fetch_historical_rates(
        &self,
        date: NaiveDate,
    ) -> Result<RatesResponse, NetworkError> {
        self.network
            .request(&ExchangeRateEndpoint::Historical(date).to_endpoint(&self.api))
            .await
    }

    /// Fetches the currency code -> display name directory.
    pub async fn fetch_currencies(&self) -> Result<CurrencyDirectory, NetworkError> {
        self.network
            .request(&ExchangeRateEndpoint::Currencies.to_endpoint(&self.api))
            .await
    }

    /// Fetches plan and quota details for the configured app id.
    pub async fn fetch_usage(&self) -> Result<UsageResponse, NetworkError> {
        self.network
            .request(&ExchangeRateEndpoint::Usage.to_endpoint(&self.api))
            .await
    }
}

/// Combines a rate map with the currency directory.
///
/// Every code in `rates` yields exactly one record, named from the directory
/// or `-` when the directory lacks it. Directory-only codes are ignored.
/// Output is ordered by code.
pub fn merge_rates(
    rates: BTreeMap<String, f64>,
    directory: &CurrencyDirectory,
) -> Vec<CurrencyRate> {
    rates
        .into_iter()
        .map(|(code, rate)| match directory.get(&code) {
            Some(name) => CurrencyRate::new(code.clone(), name.clone(), rate),
            None => CurrencyRate::unnamed(code, rate),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map<V: Clone>(pairs: &[(&str, V)]) -> BTreeMap<String, V> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_merge_names_from_directory_or_placeholder() {
        let rates = map(&[("EUR", 0.9), ("XYZ", 1.5)]);
        let directory = map(&[("EUR", "Euro".to_string())]);

        let merged = merge_rates(rates, &directory);

        assert_eq!(
            merged,
            vec![
                CurrencyRate::new("EUR", "Euro", 0.9),
                CurrencyRate::new("XYZ", "-", 1.5),
            ]
        );
    }

    #[test]
    fn test_merge_ignores_directory_only_codes() {
        let rates = map(&[("JPY", 149.5)]);
        let directory = map(&[
            ("JPY", "Japanese Yen".to_string()),
            ("GBP", "British Pound Sterling".to_string()),
        ]);

        let merged = merge_rates(rates, &directory);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].code, "JPY");
    }

    #[test]
    fn test_merge_empty_rates() {
        let directory = map(&[("EUR", "Euro".to_string())]);
        assert!(merge_rates(BTreeMap::new(), &directory).is_empty());
    }

    #[test]
    fn test_merge_each_code_exactly_once() {
        let rates = map(&[("AED", 3.67), ("AFN", 75.8), ("ALL", 98.1), ("AMD", 402.0)]);
        let merged = merge_rates(rates.clone(), &CurrencyDirectory::new());

        assert_eq!(merged.len(), rates.len());
        for code in rates.keys() {
            assert_eq!(merged.iter().filter(|r| &r.code == code).count(), 1);
        }
        assert!(merged.iter().all(|r| r.name == "-"));
    }
}
