//! Database row types and their conversion into domain values.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use xchange_types::{CurrencyRate, RepoError};

/// Currency rate row from database.
#[derive(FromRow)]
pub struct DbCurrencyRate {
    pub code: String,
    pub name: String,
    pub rate: f64,
}

impl DbCurrencyRate {
    pub fn into_domain(self) -> CurrencyRate {
        CurrencyRate::new(self.code, self.name, self.rate)
    }
}

/// Preference row from database. Timestamps are stored as RFC 3339 text.
#[derive(FromRow)]
pub struct DbPreference {
    pub key: String,
    pub value: String,
}

impl DbPreference {
    pub fn into_timestamp(self) -> Result<DateTime<Utc>, RepoError> {
        DateTime::parse_from_rfc3339(&self.value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| RepoError::Corrupt(format!("{}: {}", self.key, e)))
    }
}
