//! Export module
//!
//! Turns fetched annotations into files and summaries.
//!
//! # Overview
//!
//! - [`export_json`] writes a full-fidelity JSON document with metadata
//! - [`export_csv`] writes one flattened row per annotation
//! - [`CollectionStats`] counts annotations by user, tag, group and URI
//!
//! Annotations are handled as raw JSON so fields the API adds later are
//! preserved in JSON exports.

mod helpers;
mod stats;
mod writer;

pub use helpers::{document_title, extract_quote, extract_username, parse_date, truncate};
pub use stats::CollectionStats;
pub use writer::{export_csv, export_json, json_document, CSV_COLUMNS};

#[cfg(test)]
mod tests;
