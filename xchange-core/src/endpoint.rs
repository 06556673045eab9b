//! Routes of the exchange-rate API.

use chrono::NaiveDate;

use xchange_types::Endpoint;

use crate::config::ApiConfig;

pub const AUTHORIZATION: &str = "Authorization";

/// The API routes the service consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeRateEndpoint {
    /// Latest rates against the base currency.
    Latest,
    /// Rates at the end of the given day.
    Historical(NaiveDate),
    /// Currency code -> display name.
    Currencies,
    /// Plan and quota details for the app id.
    Usage,
}

impl ExchangeRateEndpoint {
    pub fn path(&self) -> String {
        match self {
            ExchangeRateEndpoint::Latest => "/latest.json".to_string(),
            ExchangeRateEndpoint::Historical(date) => {
                format!("/historical/{}.json", date.format("%Y-%m-%d"))
            }
            ExchangeRateEndpoint::Currencies => "/currencies.json".to_string(),
            ExchangeRateEndpoint::Usage => "/usage.json".to_string(),
        }
    }

    /// Builds the authenticated request descriptor for this route.
    pub fn to_endpoint(&self, api: &ApiConfig) -> Endpoint {
        Endpoint::get(&api.base_url, self.path())
            .with_header(AUTHORIZATION, format!("Token {}", api.app_id))
    }
}
