//! Service configuration.

/// Where the exchange-rate API lives and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub app_id: String,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://openexchangerates.org/api";

    pub fn new(base_url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            app_id: app_id.into(),
        }
    }
}

/// Tunables for the rate pipeline and the converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Currency every rate is expressed against.
    pub base_currency: String,
    /// Currency picked as conversion target when the caller has no preference.
    pub default_target: String,
    /// How long a full refresh stays valid.
    pub cache_ttl_minutes: i64,
    /// Longest amount input accepted, in characters.
    pub max_digit_limit: usize,
}

impl ServiceConfig {
    pub const DEFAULT_BASE_CURRENCY: &'static str = "USD";
    pub const DEFAULT_TARGET_CURRENCY: &'static str = "JPY";
    pub const DEFAULT_CACHE_TTL_MINUTES: i64 = 30;
    pub const DEFAULT_MAX_DIGIT_LIMIT: usize = 12;
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_currency: Self::DEFAULT_BASE_CURRENCY.to_string(),
            default_target: Self::DEFAULT_TARGET_CURRENCY.to_string(),
            cache_ttl_minutes: Self::DEFAULT_CACHE_TTL_MINUTES,
            max_digit_limit: Self::DEFAULT_MAX_DIGIT_LIMIT,
        }
    }
}
