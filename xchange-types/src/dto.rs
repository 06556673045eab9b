//! Data Transfer Objects (DTOs) for the exchange-rate API.
//!
//! Every field is optional: the upstream omits keys freely and a missing key
//! must never turn into a decoding failure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─────────────────────────────────────────────────────────────────────────────
// Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `/latest.json` and `/historical/{date}.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Unix timestamp of the upstream snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Base currency code the rates are expressed against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Currency code -> rate relative to `base`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<BTreeMap<String, f64>>,
}

/// Body of `/currencies.json`: currency code -> display name.
pub type CurrencyDirectory = BTreeMap<String, String>;

// ─────────────────────────────────────────────────────────────────────────────
// Usage DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `/usage.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub data: Option<UsageData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageData {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub plan: Option<UsagePlan>,
    #[serde(default)]
    pub usage: Option<UsageDetail>,
}

/// Subscription plan attached to the app id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsagePlan {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quota: Option<String>,
    #[serde(default)]
    pub update_frequency: Option<String>,
    #[serde(default)]
    pub features: Option<UsagePlanFeatures>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsagePlanFeatures {
    #[serde(default)]
    pub base: Option<bool>,
    #[serde(default)]
    pub symbols: Option<bool>,
    #[serde(default)]
    pub experimental: Option<bool>,
    #[serde(default)]
    pub convert: Option<bool>,
    #[serde(default)]
    pub ohlc: Option<bool>,
    #[serde(default)]
    pub spot: Option<bool>,
}

/// Request counters for the current billing period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageDetail {
    #[serde(default)]
    pub requests: Option<i64>,
    #[serde(default)]
    pub requests_quota: Option<i64>,
    #[serde(default)]
    pub requests_remaining: Option<i64>,
    #[serde(default)]
    pub days_elapsed: Option<i64>,
    #[serde(default)]
    pub days_remaining: Option<i64>,
    #[serde(default)]
    pub daily_average: Option<i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Generic error body returned with non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralErrorBody {
    #[serde(default)]
    pub error: Option<bool>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_body_decodes() {
        let body = r#"{
            "disclaimer": "Usage subject to terms: https://openexchangerates.org/terms",
            "license": "https://openexchangerates.org/license",
            "timestamp": 1696687214,
            "base": "USD",
            "rates": { "AED": 3.67303, "AFN": 75.800865 }
        }"#;
        let parsed: RatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.base.as_deref(), Some("USD"));
        assert_eq!(parsed.timestamp, Some(1696687214));
        let rates = parsed.rates.unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates["AED"], 3.67303);
    }

    #[test]
    fn test_rates_body_without_rates() {
        let parsed: RatesResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.rates.is_none());
    }

    #[test]
    fn test_usage_body_decodes_nested() {
        let body = r#"{
            "status": 200,
            "data": {
                "app_id": "abc",
                "status": "active",
                "plan": {
                    "name": "Free",
                    "quota": "1000 requests / month",
                    "update_frequency": "3600s",
                    "features": { "base": false, "symbols": false, "experimental": true,
                                  "convert": false, "ohlc": false, "spot": false }
                },
                "usage": { "requests": 12, "requests_quota": 1000, "requests_remaining": 988,
                           "days_elapsed": 3, "days_remaining": 27, "daily_average": 4 }
            }
        }"#;
        let parsed: UsageResponse = serde_json::from_str(body).unwrap();
        let data = parsed.data.unwrap();
        assert_eq!(data.plan.unwrap().features.unwrap().experimental, Some(true));
        assert_eq!(data.usage.unwrap().requests_remaining, Some(988));
    }

    #[test]
    fn test_error_body_decodes() {
        let body = r#"{"error": true, "status": 401, "message": "invalid_app_id",
                       "description": "Invalid App ID provided."}"#;
        let parsed: GeneralErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, Some(401));
        assert_eq!(parsed.description.as_deref(), Some("Invalid App ID provided."));
    }
}
