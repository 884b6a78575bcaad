//! Collection statistics

use super::helpers::{extract_username, parse_date, truncate};
use crate::types::{JsonValue, PUBLIC_GROUP};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Width used when printing URIs
const URI_DISPLAY_LEN: usize = 50;

/// Summary counts over a set of annotations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    /// Number of annotations
    pub total: usize,
    /// Annotations per username
    pub by_user: BTreeMap<String, usize>,
    /// Annotations per tag
    pub by_tag: BTreeMap<String, usize>,
    /// Annotations per group id
    pub by_group: BTreeMap<String, usize>,
    /// Annotations per document URI
    pub by_uri: BTreeMap<String, usize>,
    /// Earliest creation date
    pub earliest: Option<NaiveDate>,
    /// Latest creation date
    pub latest: Option<NaiveDate>,
    /// Annotations with non-blank text
    pub with_text: usize,
    /// Annotations without text
    pub highlights_only: usize,
    /// Annotations that are replies to another annotation
    pub replies: usize,
}

impl CollectionStats {
    /// Count over `annotations`
    pub fn from_annotations<'a, I>(annotations: I) -> Self
    where
        I: IntoIterator<Item = &'a JsonValue>,
    {
        let mut stats = Self::default();
        for annotation in annotations {
            stats.add(annotation);
        }
        stats
    }

    /// Count one more annotation
    pub fn add(&mut self, annotation: &JsonValue) {
        let str_field = |key: &str| annotation.get(key).and_then(JsonValue::as_str);

        self.total += 1;

        *self
            .by_user
            .entry(extract_username(str_field("user")))
            .or_default() += 1;

        if let Some(tags) = annotation.get("tags").and_then(JsonValue::as_array) {
            for tag in tags.iter().filter_map(JsonValue::as_str) {
                *self.by_tag.entry(tag.to_string()).or_default() += 1;
            }
        }

        let group = str_field("group").unwrap_or(PUBLIC_GROUP);
        *self.by_group.entry(group.to_string()).or_default() += 1;

        let uri = str_field("uri").unwrap_or("unknown");
        *self.by_uri.entry(uri.to_string()).or_default() += 1;

        if let Some(created) = parse_date(str_field("created")) {
            let day = created.date_naive();
            self.earliest = Some(self.earliest.map_or(day, |d| d.min(day)));
            self.latest = Some(self.latest.map_or(day, |d| d.max(day)));
        }

        if str_field("text").is_some_and(|t| !t.trim().is_empty()) {
            self.with_text += 1;
        } else {
            self.highlights_only += 1;
        }

        let is_reply = annotation
            .get("references")
            .and_then(JsonValue::as_array)
            .is_some_and(|refs| !refs.is_empty());
        if is_reply {
            self.replies += 1;
        }
    }

    /// Most frequent users, highest count first
    pub fn top_users(&self, n: usize) -> Vec<(&str, usize)> {
        most_common(&self.by_user, n)
    }

    /// Most frequent tags, highest count first
    pub fn top_tags(&self, n: usize) -> Vec<(&str, usize)> {
        most_common(&self.by_tag, n)
    }

    /// Most frequent groups, highest count first
    pub fn top_groups(&self, n: usize) -> Vec<(&str, usize)> {
        most_common(&self.by_group, n)
    }

    /// Most frequent URIs, highest count first
    pub fn top_uris(&self, n: usize) -> Vec<(&str, usize)> {
        most_common(&self.by_uri, n)
    }
}

/// Sort by count descending; ties keep key order
fn most_common(counts: &BTreeMap<String, usize>, n: usize) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

impl fmt::Display for CollectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total annotations: {}", self.total)?;
        if self.total == 0 {
            return Ok(());
        }

        writeln!(f, "\nBy User:")?;
        for (user, count) in self.top_users(10) {
            writeln!(f, "  {user}: {count}")?;
        }

        if !self.by_tag.is_empty() {
            writeln!(f, "\nBy Tag:")?;
            for (tag, count) in self.top_tags(15) {
                writeln!(f, "  {tag}: {count}")?;
            }
        }

        // Only worth showing when something is outside the public group
        if self.by_group.len() > 1 || !self.by_group.contains_key(PUBLIC_GROUP) {
            writeln!(f, "\nBy Group:")?;
            for (group, count) in self.top_groups(5) {
                let name = if group == PUBLIC_GROUP { "Public" } else { group };
                writeln!(f, "  {name}: {count}")?;
            }
        }

        if let (Some(earliest), Some(latest)) = (self.earliest, self.latest) {
            writeln!(f, "\nDate Range:")?;
            writeln!(f, "  Earliest: {earliest}")?;
            writeln!(f, "  Latest:   {latest}")?;
        }

        writeln!(f, "\nContent Types:")?;
        writeln!(f, "  With text: {}", self.with_text)?;
        writeln!(f, "  Highlights only: {}", self.highlights_only)?;
        writeln!(f, "  Replies: {}", self.replies)?;

        if self.by_uri.len() > 1 {
            writeln!(f, "\nBy URI:")?;
            for (uri, count) in self.top_uris(5) {
                writeln!(f, "  {}: {count}", truncate(Some(uri), URI_DISPLAY_LEN))?;
            }
        }
        Ok(())
    }
}
