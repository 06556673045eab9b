//! # XChange Client
//!
//! A `NetworkClient` adapter over `reqwest`.
//!
//! Each call is a single attempt: the endpoint is turned into a request,
//! sent once, and the response is either decoded into the caller's type or
//! mapped onto a `NetworkError`.

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;

use xchange_types::{Endpoint, GeneralErrorBody, HttpMethod, NetworkClient, NetworkError};

/// HTTP client for JSON APIs.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    http: Client,
}

impl HttpClient {
    /// Creates a client with reqwest's default transport settings.
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Wraps a preconfigured reqwest client (proxies, timeouts, TLS roots).
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    fn build_request(&self, endpoint: &Endpoint) -> Result<reqwest::RequestBuilder, NetworkError> {
        let url = build_url(endpoint)?;
        let mut req = self.http.request(to_method(endpoint.method), url);
        for (name, value) in &endpoint.headers {
            req = req.header(name, value);
        }
        if let Some(body) = &endpoint.body {
            req = req.json(body);
        }
        Ok(req)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, NetworkError> {
        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read response body");
            NetworkError::Unknown
        })?;

        if !status.is_success() {
            return Err(map_error_body(status.as_u16(), &body));
        }

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to decode response body");
            NetworkError::Decoding(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl NetworkClient for HttpClient {
    async fn request<T>(&self, endpoint: &Endpoint) -> Result<T, NetworkError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let req = self.build_request(endpoint)?;
        tracing::debug!(method = %endpoint.method, path = %endpoint.path, "Sending request");

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(error = %e, path = %endpoint.path, "Request failed");
            NetworkError::Unknown
        })?;

        tracing::debug!(status = resp.status().as_u16(), path = %endpoint.path, "Received response");
        self.handle_response(resp).await
    }
}

/// Builds and validates the request URL for an endpoint.
pub fn build_url(endpoint: &Endpoint) -> Result<Url, NetworkError> {
    let raw = endpoint.url();
    Url::parse(&raw).map_err(|e| {
        tracing::warn!(url = %raw, error = %e, "Failed while constructing url");
        NetworkError::Construction(format!("{}: {}", raw, e))
    })
}

/// Maps a non-2xx response onto a `NetworkError`.
///
/// The error body's own `status` wins over the HTTP status. A body that is
/// not a JSON object yields `Unknown`.
pub fn map_error_body(http_status: u16, body: &[u8]) -> NetworkError {
    match serde_json::from_slice::<GeneralErrorBody>(body) {
        Ok(err) => {
            let status = err.status.unwrap_or(http_status);
            tracing::debug!(
                status,
                message = err.message.as_deref().unwrap_or_default(),
                "Upstream returned an error body"
            );
            NetworkError::from_status(status, err.description)
        }
        Err(e) => {
            tracing::warn!(http_status, error = %e, "Failed to decode error body");
            NetworkError::Unknown
        }
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_base_path_and_query() {
        let endpoint = Endpoint::get("http://localhost:3000/api/", "/latest.json")
            .with_query("base", "USD");
        let url = build_url(&endpoint).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/latest.json?base=USD");
    }

    #[test]
    fn test_build_url_rejects_garbage() {
        let endpoint = Endpoint::get("not a url", "/latest.json");
        let err = build_url(&endpoint).unwrap_err();
        assert!(matches!(err, NetworkError::Construction(_)));
    }

    #[test]
    fn test_build_url_rejects_empty_base() {
        let endpoint = Endpoint::get("", "/latest.json");
        assert!(matches!(
            build_url(&endpoint),
            Err(NetworkError::Construction(_))
        ));
    }

    #[test]
    fn test_error_body_status_wins() {
        let body = br#"{"error": true, "status": 401, "description": "Invalid App ID"}"#;
        let err = map_error_body(403, body);
        assert_eq!(err, NetworkError::Unauthorized(Some("Invalid App ID".into())));
    }

    #[test]
    fn test_error_body_without_status_uses_http_status() {
        let err = map_error_body(404, br#"{"message": "not_found"}"#);
        assert_eq!(err, NetworkError::NotFound(None));
    }

    #[test]
    fn test_unmapped_status_is_unknown() {
        let err = map_error_body(429, br#"{"status": 429, "description": "slow down"}"#);
        assert_eq!(err, NetworkError::Unknown);
    }

    #[test]
    fn test_undecodable_error_body_is_unknown() {
        assert_eq!(map_error_body(503, b"<html>down</html>"), NetworkError::Unknown);
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_method(HttpMethod::Get), Method::GET);
        assert_eq!(to_method(HttpMethod::Delete), Method::DELETE);
    }
}
