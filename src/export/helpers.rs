//! Field extraction helpers for annotation JSON

use crate::types::{username_from_acct, JsonValue};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Placeholder for a missing user
const UNKNOWN_USER: &str = "(unknown)";

/// Placeholder for an annotation without text
const NO_TEXT: &str = "(no text)";

/// Username part of an `acct:username@authority` id
///
/// Values without the `acct:` prefix are returned unchanged.
pub fn extract_username(user: Option<&str>) -> String {
    match user {
        None | Some("") => UNKNOWN_USER.to_string(),
        Some(user) => username_from_acct(user).to_string(),
    }
}

/// Exact text of the first `TextQuoteSelector`, or an empty string
pub fn extract_quote(annotation: &JsonValue) -> String {
    let targets = annotation
        .get("target")
        .and_then(JsonValue::as_array)
        .map_or(&[][..], Vec::as_slice);

    targets
        .iter()
        .filter_map(|target| target.get("selector").and_then(JsonValue::as_array))
        .flatten()
        .find(|selector| {
            selector.get("type").and_then(JsonValue::as_str) == Some("TextQuoteSelector")
        })
        .and_then(|selector| selector.get("exact").and_then(JsonValue::as_str))
        .unwrap_or_default()
        .to_string()
}

/// Title of the annotated document
///
/// The API sends `document.title` as a list; a plain string is accepted too.
pub fn document_title(annotation: &JsonValue) -> String {
    match annotation.pointer("/document/title") {
        Some(JsonValue::Array(titles)) => titles
            .first()
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(JsonValue::String(title)) => title.clone(),
        _ => String::new(),
    }
}

/// Parse an API timestamp
///
/// Accepts RFC 3339 with an offset or `Z`, and naive timestamps which are
/// taken as UTC. Returns `None` for empty or malformed input.
pub fn parse_date(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Single-line text cut to `max_len` characters with a trailing `...`
pub fn truncate(text: Option<&str>, max_len: usize) -> String {
    let text = text.unwrap_or_default().replace('\n', " ");
    let text = text.trim();
    if text.is_empty() {
        return NO_TEXT.to_string();
    }

    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}
