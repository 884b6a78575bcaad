//! Request payload types for client endpoints

use crate::types::{JsonValue, QueryPairs};
use serde::{Deserialize, Serialize};

/// A new annotation
///
/// Converted to the JSON payload of the create endpoint. Fields left
/// unset are filled in by
/// [`HypothesisClient::create_annotation`](super::HypothesisClient::create_annotation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAnnotation {
    /// Document URI (required)
    pub uri: String,
    /// Annotation body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Group id; defaults to the public group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Parent annotation ids, for replies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    /// Target selectors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<JsonValue>,
    /// Document metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<JsonValue>,
}

impl NewAnnotation {
    /// Start an annotation on `uri`
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Make this a reply to `parent`
    #[must_use]
    pub fn reply_to(mut self, parent: impl Into<String>) -> Self {
        self.references.push(parent.into());
        self
    }

    #[must_use]
    pub fn target(mut self, target: JsonValue) -> Self {
        self.target = Some(target);
        self
    }

    /// Highlight `exact` text on the page
    #[must_use]
    pub fn quote(self, exact: impl Into<String>) -> Self {
        let source = self.uri.clone();
        self.target(serde_json::json!([{
            "source": source,
            "selector": [{"type": "TextQuoteSelector", "exact": exact.into()}]
        }]))
    }

    /// JSON payload for the create endpoint
    pub fn to_payload(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Filters for group listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    /// Authority domain
    pub authority: Option<String>,
    /// Only groups usable on this document
    pub document_uri: Option<String>,
    /// Related objects to expand (e.g. `organization`, `scopes`)
    pub expand: Vec<String>,
}

impl GroupFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    #[must_use]
    pub fn document_uri(mut self, uri: impl Into<String>) -> Self {
        self.document_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn expand(mut self, field: impl Into<String>) -> Self {
        self.expand.push(field.into());
        self
    }

    /// Encode as query pairs; each expand field is its own pair
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = Vec::new();
        if let Some(authority) = &self.authority {
            pairs.push(("authority".to_string(), authority.clone()));
        }
        if let Some(uri) = &self.document_uri {
            pairs.push(("document_uri".to_string(), uri.clone()));
        }
        for field in &self.expand {
            pairs.push(("expand".to_string(), field.clone()));
        }
        pairs
    }
}

/// A new user on a third-party authority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub authority: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Identity provider records, e.g. `{"provider": ..., "provider_unique_id": ...}`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identities: Vec<JsonValue>,
}

impl NewUser {
    pub fn new(
        authority: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            authority: authority.into(),
            username: username.into(),
            email: email.into(),
            display_name: None,
            identities: Vec::new(),
        }
    }

    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Selection for the bulk annotation endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAnnotationFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Selection for the bulk group endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkGroupFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
}
