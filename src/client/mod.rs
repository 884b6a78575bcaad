//! Hypothesis API client
//!
//! `HypothesisClient` exposes one async method per API endpoint. Every
//! method goes through [`HttpClient`], so error statuses surface as typed
//! [`Error`](crate::Error) values and successful responses as JSON.
//!
//! Endpoint groups live in their own files:
//!
//! - `annotations` - create, read, update, delete, moderation
//! - `groups` - groups and memberships
//! - `profile` - the authenticated user's profile
//! - `users` - admin user management
//! - `bulk` - bulk and analytics endpoints
//!
//! Searching is implemented here since it backs [`PageFetcher`].

mod annotations;
mod bulk;
mod groups;
mod profile;
mod types;
mod users;

pub use types::{BulkAnnotationFilter, BulkGroupFilter, GroupFilter, NewAnnotation, NewUser};

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{paginate, Page, PageFetcher, PageWindow, SearchStream};
use crate::search::SearchFilters;
use crate::types::{JsonValue, APP_URL};
use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;
use tracing::debug;

/// Client for the Hypothesis web annotation API
#[derive(Debug)]
pub struct HypothesisClient {
    http: HttpClient,
    credentials: Credentials,
    app_url: String,
}

impl HypothesisClient {
    /// Create a client against the public Hypothesis service
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_http_config(credentials, HttpClientConfig::default(), APP_URL)
    }

    /// Create a client with a custom HTTP configuration
    pub fn with_http_config(
        credentials: Credentials,
        http_config: HttpClientConfig,
        app_url: impl Into<String>,
    ) -> Result<Self> {
        let http = HttpClient::with_auth(http_config, credentials.auth_config())?;
        Ok(Self {
            http,
            credentials,
            app_url: app_url.into(),
        })
    }

    /// Create a client from a validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(config.api_url.clone())
            .timeout(Duration::from_secs(config.timeout_secs));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(rate_limit) = &config.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }

        Self::with_http_config(config.credentials(), builder.build(), config.app_url.clone())
    }

    /// Base URL of the API
    pub fn api_url(&self) -> &str {
        &self.http.config().base_url
    }

    /// Base URL of the web application
    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    /// Credentials used by this client
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // ========================================================================
    // Root
    // ========================================================================

    /// API root with hypermedia links
    pub async fn root(&self) -> Result<JsonValue> {
        self.http.get("", RequestConfig::new().unauthenticated()).await
    }

    /// URL templates for pages of the web application
    pub async fn links(&self) -> Result<JsonValue> {
        self.http
            .get("links", RequestConfig::new().unauthenticated())
            .await
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Stream every annotation matching `filters`
    ///
    /// Pages of `limit` records (clamped to the API maximum) are fetched
    /// lazily starting at `offset`.
    pub fn search(
        &self,
        filters: SearchFilters,
        limit: u32,
        offset: u64,
    ) -> SearchStream<'_, JsonValue> {
        paginate(self, filters, limit, offset)
    }

    /// Fetch a single page of search results
    pub async fn search_page(
        &self,
        filters: &SearchFilters,
        window: PageWindow,
    ) -> Result<Page<JsonValue>> {
        let request = self.search_request(filters, window);
        self.http.request_as(Method::GET, "search", request).await
    }

    /// Fetch a single page of search results as the raw response body
    ///
    /// The limit is sent as given; the API enforces its own maximum.
    pub async fn search_raw(
        &self,
        filters: &SearchFilters,
        limit: u32,
        offset: u64,
    ) -> Result<JsonValue> {
        let window = PageWindow { offset, limit };
        let request = self.search_request(filters, window);
        self.http.get("search", request).await
    }

    fn search_request(&self, filters: &SearchFilters, window: PageWindow) -> RequestConfig {
        RequestConfig::new()
            .query_pairs(filters.to_query(&self.credentials.authority))
            .query_pairs(window.to_query())
    }
}

#[async_trait]
impl PageFetcher for HypothesisClient {
    type Record = JsonValue;

    async fn fetch_page(
        &self,
        filters: &SearchFilters,
        window: PageWindow,
    ) -> Result<Page<JsonValue>> {
        debug!("Searching at offset {} (limit {})", window.offset, window.limit);
        self.search_page(filters, window).await
    }
}

/// Percent-encode one path segment
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
