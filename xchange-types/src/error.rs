//! Error types for the exchange-rate pipeline.

/// Network-level errors surfaced by a `NetworkClient`.
///
/// HTTP variants carry the upstream description when one was returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("{}", describe(.0, "[Bad Request] Please check your url request."))]
    BadRequest(Option<String>),

    #[error("{}", describe(.0, "[Unauthorized] Please check your credentials."))]
    Unauthorized(Option<String>),

    #[error("{}", describe(.0, "[No Permission] Please check your permission."))]
    Forbidden(Option<String>),

    #[error("{}", describe(.0, "[Not Found] The url you are looking for was not found."))]
    NotFound(Option<String>),

    #[error("{}", describe(.0, "[Server Error] Server is currently not available."))]
    ServerError(Option<String>),

    #[error("{}", describe(.0, "[Under Maintenance] Please get back later."))]
    UnderMaintenance(Option<String>),

    #[error("[Unknown] Network error cannot be defined.")]
    Unknown,

    #[error("[Decoding] Failed to decode response body: {0}")]
    Decoding(String),

    #[error("[Construction] Failed to construct request: {0}")]
    Construction(String),
}

fn describe<'a>(description: &'a Option<String>, fallback: &'a str) -> &'a str {
    description.as_deref().unwrap_or(fallback)
}

impl NetworkError {
    /// Status reported for errors that do not map to a known HTTP status.
    pub const UNKNOWN_STATUS: u16 = 520;

    /// Maps an HTTP status (or the status from an error body) to an error kind.
    pub fn from_status(status: u16, description: Option<String>) -> Self {
        match status {
            400 => NetworkError::BadRequest(description),
            401 => NetworkError::Unauthorized(description),
            403 => NetworkError::Forbidden(description),
            404 => NetworkError::NotFound(description),
            500 => NetworkError::ServerError(description),
            503 => NetworkError::UnderMaintenance(description),
            _ => NetworkError::Unknown,
        }
    }

    /// Returns the HTTP status code associated with this error.
    pub fn status_code(&self) -> u16 {
        match self {
            NetworkError::BadRequest(_) | NetworkError::Construction(_) => 400,
            NetworkError::Unauthorized(_) => 401,
            NetworkError::Forbidden(_) => 403,
            NetworkError::NotFound(_) => 404,
            NetworkError::ServerError(_) => 500,
            NetworkError::UnderMaintenance(_) => 503,
            NetworkError::Unknown | NetworkError::Decoding(_) => Self::UNKNOWN_STATUS,
        }
    }

    /// Returns the upstream description, if the error carries one.
    pub fn description(&self) -> Option<&str> {
        match self {
            NetworkError::BadRequest(d)
            | NetworkError::Unauthorized(d)
            | NetworkError::Forbidden(d)
            | NetworkError::NotFound(d)
            | NetworkError::ServerError(d)
            | NetworkError::UnderMaintenance(d) => d.as_deref(),
            NetworkError::Decoding(d) | NetworkError::Construction(d) => Some(d),
            NetworkError::Unknown => None,
        }
    }
}

/// Repository-level errors (data access failures).
///
/// Adapters log these and swallow them; they never cross the store port.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Corrupt value: {0}")]
    Corrupt(String),
}

/// Errors from client-side currency arithmetic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    #[error("Rate for {code} is not usable: {rate}")]
    InvalidRate { code: String, rate: f64 },

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(NetworkError::from_status(400, None), NetworkError::BadRequest(None));
        assert_eq!(NetworkError::from_status(401, None), NetworkError::Unauthorized(None));
        assert_eq!(NetworkError::from_status(403, None), NetworkError::Forbidden(None));
        assert_eq!(NetworkError::from_status(404, None), NetworkError::NotFound(None));
        assert_eq!(NetworkError::from_status(500, None), NetworkError::ServerError(None));
        assert_eq!(
            NetworkError::from_status(503, None),
            NetworkError::UnderMaintenance(None)
        );
        assert_eq!(NetworkError::from_status(418, None), NetworkError::Unknown);
        assert_eq!(NetworkError::from_status(502, Some("x".into())), NetworkError::Unknown);
    }

    #[test]
    fn test_status_code_round_trips_known_statuses() {
        for status in [400, 401, 403, 404, 500, 503] {
            assert_eq!(NetworkError::from_status(status, None).status_code(), status);
        }
        assert_eq!(NetworkError::Unknown.status_code(), 520);
    }

    #[test]
    fn test_message_prefers_description() {
        let err = NetworkError::Unauthorized(Some("Invalid App ID provided.".into()));
        assert_eq!(err.to_string(), "Invalid App ID provided.");
        assert_eq!(err.description(), Some("Invalid App ID provided."));
    }

    #[test]
    fn test_message_falls_back_to_default() {
        let err = NetworkError::UnderMaintenance(None);
        assert_eq!(err.to_string(), "[Under Maintenance] Please get back later.");
        assert_eq!(
            NetworkError::Unknown.to_string(),
            "[Unknown] Network error cannot be defined."
        );
    }

    #[test]
    fn test_conversion_error_display() {
        let err = ConversionError::InvalidRate {
            code: "EUR".into(),
            rate: 0.0,
        };
        assert_eq!(err.to_string(), "Rate for EUR is not usable: 0");
    }
}
