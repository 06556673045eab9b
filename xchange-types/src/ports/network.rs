//! Network client port.
//!
//! An `Endpoint` describes a single request; a `NetworkClient` executes it
//! and decodes the JSON body into the caller's expected shape.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::NetworkError;

/// HTTP methods an endpoint can use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor of one request against a remote API.
///
/// Query values are inserted verbatim; callers pre-encode anything that
/// needs percent-encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub base_url: String,
    pub path: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
    pub query: Vec<(String, String)>,
}

impl Endpoint {
    /// Creates a GET endpoint with no headers, body or query.
    pub fn get(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            method: HttpMethod::Get,
            headers: BTreeMap::new(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialized query string (`k=v` pairs joined by `&`), empty when none.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full request URL: base (trailing `/` trimmed) + path + query.
    pub fn url(&self) -> String {
        let mut url = format!("{}{}", self.base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query_string());
        }
        url
    }
}

/// Port trait for issuing typed requests.
///
/// Implementations make a single attempt: no retry, no backoff.
#[async_trait::async_trait]
pub trait NetworkClient: Send + Sync + 'static {
    /// Executes `endpoint` and decodes a 2xx body as `T`.
    ///
    /// Non-2xx responses map to the HTTP variants of `NetworkError`; a body
    /// that does not match `T` yields `NetworkError::Decoding`.
    async fn request<T>(&self, endpoint: &Endpoint) -> Result<T, NetworkError>
    where
        T: DeserializeOwned + Send + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_without_query() {
        let endpoint = Endpoint::get("https://openexchangerates.org/api/", "/latest.json");
        assert_eq!(endpoint.url(), "https://openexchangerates.org/api/latest.json");
    }

    #[test]
    fn test_url_with_query_keeps_insertion_order() {
        let endpoint = Endpoint::get("https://example.com", "/latest.json")
            .with_query("base", "USD")
            .with_query("symbols", "EUR,JPY")
            .with_query("show_alternative", false);
        assert_eq!(
            endpoint.url(),
            "https://example.com/latest.json?base=USD&symbols=EUR,JPY&show_alternative=false"
        );
    }

    #[test]
    fn test_builder_sets_method_headers_and_body() {
        let endpoint = Endpoint::get("https://example.com", "/convert")
            .with_method(HttpMethod::Post)
            .with_header("Authorization", "Token abc")
            .with_body(serde_json::json!({ "amount": 10 }));
        assert_eq!(endpoint.method.as_str(), "POST");
        assert_eq!(endpoint.headers["Authorization"], "Token abc");
        assert!(endpoint.body.is_some());
    }
}
