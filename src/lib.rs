// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Hypothesis API Client
//!
//! An async Rust client for the [Hypothesis](https://web.hypothes.is/)
//! web annotation API, with a command-line front end.
//!
//! ## Features
//!
//! - **Annotations**: Create, read, update, delete, flag, hide and moderate
//! - **Search**: Lazy, resumable iteration over every matching annotation
//! - **Groups and Profiles**: Groups, memberships and user preferences
//! - **Export**: JSON and CSV files plus collection statistics
//! - **Typed Errors**: HTTP status codes mapped to error kinds
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use hypothesis_api::{Credentials, HypothesisClient, Result, SearchFilters};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = HypothesisClient::new(Credentials::new("alice", "6879-..."))?;
//!
//!     // Every annotation tagged "rust", fetched 200 at a time
//!     let mut results = client.search(SearchFilters::new().tag("rust"), 200, 0);
//!     while let Some(annotation) = results.try_next().await? {
//!         println!("{}", annotation["id"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       HypothesisClient                          │
//! │  annotations   search → SearchStream   groups   profile   users │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │  Pagination   │  Search   │   Export    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Bearer   │ GET/POST  │ SearchCursor  │ Filters   │ JSON        │
//! │ API key  │ Errors    │ Iterator      │ Sorting   │ CSV         │
//! │          │ Rate Limit│ Stream        │           │ Stats       │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// API key credentials and bearer authentication
pub mod auth;

/// HTTP client with error mapping and rate limiting
pub mod http;

/// Offset pagination over search results
pub mod pagination;

/// Search filters
pub mod search;

/// Hypothesis API client
pub mod client;

/// Client configuration
pub mod config;

/// JSON/CSV export and statistics
pub mod export;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::Credentials;
pub use client::{GroupFilter, HypothesisClient, NewAnnotation};
pub use config::ClientConfig;
pub use pagination::{iterate, paginate, Page, PageFetcher, PageWindow, SearchIter, SearchStream};
pub use search::SearchFilters;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
