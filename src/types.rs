//! Common types used throughout the Hypothesis client
//!
//! This module contains shared constants, type aliases,
//! and small value types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Constants
// ============================================================================

/// Default base URL of the Hypothesis API
pub const API_URL: &str = "https://hypothes.is/api";

/// Default base URL of the Hypothesis web application
pub const APP_URL: &str = "https://hypothes.is/app";

/// Default authority for user accounts
pub const DEFAULT_AUTHORITY: &str = "hypothes.is";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Largest page the search endpoint will return
pub const MAX_PAGE_SIZE: u32 = 200;

/// Group id of the public layer
pub const PUBLIC_GROUP: &str = "__world__";

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Ordered query parameters; keys may repeat (e.g. `tag=a&tag=b`)
pub type QueryPairs = Vec<(String, String)>;

// ============================================================================
// Search Sorting
// ============================================================================

/// Field the search endpoint sorts by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Updated,
    Created,
    Id,
    Group,
    User,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Created => "created",
            SortField::Updated => "updated",
            SortField::Id => "id",
            SortField::Group => "group",
            SortField::User => "user",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" => Ok(SortField::Created),
            "updated" => Ok(SortField::Updated),
            "id" => Ok(SortField::Id),
            "group" => Ok(SortField::Group),
            "user" => Ok(SortField::User),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

// ============================================================================
// Moderation
// ============================================================================

/// Moderation status accepted by the moderation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationStatus {
    Approved,
    Pending,
    Denied,
    Spam,
    Hidden,
    Flagged,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Approved => "APPROVED",
            ModerationStatus::Pending => "PENDING",
            ModerationStatus::Denied => "DENIED",
            ModerationStatus::Spam => "SPAM",
            ModerationStatus::Hidden => "HIDDEN",
            ModerationStatus::Flagged => "FLAGGED",
        }
    }
}

// ============================================================================
// User Accounts
// ============================================================================

/// Format a username as an account id (`acct:<user>@<authority>`).
///
/// Values already in `acct:` form are returned unchanged.
pub fn user_acct(user: &str, authority: &str) -> String {
    if user.starts_with("acct:") {
        user.to_string()
    } else {
        format!("acct:{user}@{authority}")
    }
}

/// Extract the bare username from an `acct:<user>@<authority>` id
pub fn username_from_acct(acct: &str) -> &str {
    match acct.strip_prefix("acct:") {
        Some(rest) => rest.split('@').next().unwrap_or(rest),
        None => acct,
    }
}
