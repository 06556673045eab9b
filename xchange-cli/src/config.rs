//! Service tunables loaded from the environment.

use std::env;

use anyhow::Context;
use xchange_core::ServiceConfig;

pub const BASE_CURRENCY: &str = "XCHANGE_BASE_CURRENCY";
pub const TARGET_CURRENCY: &str = "XCHANGE_TARGET_CURRENCY";
pub const CACHE_TTL_MINUTES: &str = "XCHANGE_CACHE_TTL_MINUTES";
pub const MAX_DIGITS: &str = "XCHANGE_MAX_DIGITS";

/// Loads the service configuration from environment variables.
pub fn from_env() -> anyhow::Result<ServiceConfig> {
    from_lookup(|key| env::var(key).ok())
}

/// Builds the configuration from any key lookup, falling back to defaults.
pub fn from_lookup<F>(lookup: F) -> anyhow::Result<ServiceConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ServiceConfig::default();

    let base_currency = lookup(BASE_CURRENCY)
        .map(|v| v.trim().to_uppercase())
        .unwrap_or(defaults.base_currency);

    let default_target = lookup(TARGET_CURRENCY)
        .map(|v| v.trim().to_uppercase())
        .unwrap_or(defaults.default_target);

    let cache_ttl_minutes = match lookup(CACHE_TTL_MINUTES) {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{CACHE_TTL_MINUTES} must be an integer, got {v:?}"))?,
        None => defaults.cache_ttl_minutes,
    };
    if cache_ttl_minutes <= 0 {
        anyhow::bail!("{CACHE_TTL_MINUTES} must be positive, got {cache_ttl_minutes}");
    }

    let max_digit_limit = match lookup(MAX_DIGITS) {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{MAX_DIGITS} must be an integer, got {v:?}"))?,
        None => defaults.max_digit_limit,
    };

    Ok(ServiceConfig {
        base_currency,
        default_target,
        cache_ttl_minutes,
        max_digit_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_lookup(lookup(&[
            (BASE_CURRENCY, "eur"),
            (TARGET_CURRENCY, " gbp "),
            (CACHE_TTL_MINUTES, "5"),
            (MAX_DIGITS, "8"),
        ]))
        .unwrap();

        assert_eq!(config.base_currency, "EUR");
        assert_eq!(config.default_target, "GBP");
        assert_eq!(config.cache_ttl_minutes, 5);
        assert_eq!(config.max_digit_limit, 8);
    }

    #[test]
    fn test_rejects_bad_ttl() {
        assert!(from_lookup(lookup(&[(CACHE_TTL_MINUTES, "soon")])).is_err());
        assert!(from_lookup(lookup(&[(CACHE_TTL_MINUTES, "0")])).is_err());
    }

    #[test]
    fn test_rejects_bad_digit_limit() {
        assert!(from_lookup(lookup(&[(MAX_DIGITS, "-3")])).is_err());
    }
}
