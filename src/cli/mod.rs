//! CLI module
//!
//! Command-line interface for the Hypothesis API.
//!
//! # Commands
//!
//! - `get` - Fetch one annotation
//! - `search` - Stream annotations matching filters
//! - `create` / `update` / `delete` - Manage annotations
//! - `groups` / `create-group` / `members` - Groups
//! - `profile` - Show the authenticated profile
//! - `export` - Write search results to JSON and CSV files
//! - `stats` - Summarize search results

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SearchArgs};
pub use runner::Runner;
