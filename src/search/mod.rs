//! Search module
//!
//! The filter set for one logical annotation search and its
//! query-string encoding. Page windows are appended per request by the
//! pagination layer, so filters never carry `offset` or `limit`.

mod filters;

pub use filters::SearchFilters;
