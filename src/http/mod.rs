//! HTTP client module
//!
//! Provides the generic request/response cycle every endpoint goes through.
//!
//! # Features
//!
//! - **Status Classification**: non-2xx responses become typed errors
//! - **Authentication**: bearer token from the auth module
//! - **Rate Limiting**: optional token bucket using governor
//!
//! Requests are never retried; a failed request surfaces to the caller.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
