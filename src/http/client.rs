//! HTTP client for the Hypothesis API
//!
//! Provides the request/response cycle shared by every endpoint:
//! - URL joining against the configured base URL
//! - Default JSON headers and bearer authentication
//! - Optional client-side rate limiting
//! - Classification of error statuses into typed errors

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::{QueryPairs, API_URL, DEFAULT_TIMEOUT_SECS};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("hypothesis-api-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Query parameters, in order; keys may repeat
    pub query: QueryPairs,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Send the bearer token with this request
    pub authenticated: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
            authenticated: true,
        }
    }
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a list of query parameters
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send this request without credentials
    #[must_use]
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// HTTP client with authentication and optional rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: None,
            rate_limiter,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.set_authenticator(auth_config);
        Ok(client)
    }

    /// Set the authenticator
    pub fn set_authenticator(&mut self, auth_config: AuthConfig) {
        self.authenticator = Some(Authenticator::new(auth_config));
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if requests carry a credential
    pub fn is_authenticated(&self) -> bool {
        self.authenticator
            .as_ref()
            .is_some_and(|a| a.config().is_authenticated())
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Make a GET request and parse the JSON response
    pub async fn get(&self, path: &str, config: RequestConfig) -> Result<Value> {
        self.request_json(Method::GET, path, config).await
    }

    /// Make a POST request and parse the JSON response
    pub async fn post(&self, path: &str, config: RequestConfig) -> Result<Value> {
        self.request_json(Method::POST, path, config).await
    }

    /// Make a PUT request and parse the JSON response
    pub async fn put(&self, path: &str, config: RequestConfig) -> Result<Value> {
        self.request_json(Method::PUT, path, config).await
    }

    /// Make a PATCH request and parse the JSON response
    pub async fn patch(&self, path: &str, config: RequestConfig) -> Result<Value> {
        self.request_json(Method::PATCH, path, config).await
    }

    /// Make a DELETE request and parse the JSON response
    pub async fn delete(&self, path: &str, config: RequestConfig) -> Result<Value> {
        self.request_json(Method::DELETE, path, config).await
    }

    /// Make a request and decode the JSON body into `T`
    ///
    /// A body that does not match `T` is an [`Error::InvalidResponse`].
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let (status, value) = self.fetch_json(method, path, config).await?;
        serde_json::from_value(value).map_err(|e| invalid_response(status, &e))
    }

    /// Make a request and parse the JSON response
    ///
    /// A 204 or an empty body yields an empty JSON object. A body that is
    /// not JSON is an [`Error::InvalidResponse`].
    pub async fn request_json(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Value> {
        let (_, value) = self.fetch_json(method, path, config).await?;
        Ok(value)
    }

    async fn fetch_json(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<(u16, Value)> {
        let response = self.request(method, path, config).await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok((status.as_u16(), Value::Object(serde_json::Map::new())));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok((status.as_u16(), Value::Object(serde_json::Map::new())));
        }
        let value: Value =
            serde_json::from_str(&body).map_err(|e| invalid_response(status.as_u16(), &e))?;
        Ok((status.as_u16(), value))
    }

    /// Make a generic request
    ///
    /// Returns the response for any 2xx status and a classified error otherwise.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let full_url = self.build_url(path);
        let timeout = config.timeout.unwrap_or(self.config.timeout);

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self
            .client
            .request(method.clone(), &full_url)
            .header(ACCEPT, "application/json")
            .timeout(timeout);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(serde_json::to_vec(body)?);
        }

        if config.authenticated {
            if let Some(ref auth) = self.authenticator {
                req = auth.apply(req);
            }
        }

        debug!("{} {}", method, full_url);

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            debug!("Request succeeded: {} {} -> {}", method, full_url, status.as_u16());
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("Request failed: {} {} -> {}", method, full_url, status.as_u16());
        Err(Error::from_status(status.as_u16(), body))
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }
}

fn invalid_response(status: u16, err: &serde_json::Error) -> Error {
    debug!("Undecodable response body (HTTP {status}): {err}");
    Error::InvalidResponse {
        status,
        message: err.to_string(),
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
