//! Search filter set

use crate::types::{user_acct, QueryPairs, SortField, SortOrder};

/// Constraints for one annotation search
///
/// Filters are passed through unchanged to every page fetch of a
/// search. Unknown parameters can be supplied with [`SearchFilters::param`];
/// the API validates them, not this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Username or full `acct:` id
    pub user: Option<String>,
    /// Authority used to qualify a bare username
    pub authority: Option<String>,
    /// Exact document URI
    pub uri: Option<String>,
    /// URI pattern with `*` / `_` wildcards
    pub wildcard_uri: Option<String>,
    /// Annotation body text
    pub text: Option<String>,
    /// Match across all text fields
    pub any: Option<String>,
    /// Tags; all must match
    pub tags: Vec<String>,
    /// Group id
    pub group: Option<String>,
    /// Quoted (highlighted) text
    pub quote: Option<String>,
    /// Parent annotation id, for replies
    pub references: Option<String>,
    /// Sort field
    pub sort: Option<SortField>,
    /// Sort direction
    pub order: SortOrder,
    /// Additional raw parameters
    pub extra: QueryPairs,
}

impl SearchFilters {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Alias for [`SearchFilters::uri`]
    #[must_use]
    pub fn url(self, url: impl Into<String>) -> Self {
        self.uri(url)
    }

    #[must_use]
    pub fn wildcard_uri(mut self, pattern: impl Into<String>) -> Self {
        self.wildcard_uri = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn any(mut self, any: impl Into<String>) -> Self {
        self.any = Some(any.into());
        self
    }

    /// Add one tag
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add several tags
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }

    #[must_use]
    pub fn references(mut self, id: impl Into<String>) -> Self {
        self.references = Some(id.into());
        self
    }

    #[must_use]
    pub fn sort(mut self, field: SortField) -> Self {
        self.sort = Some(field);
        self
    }

    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Add a raw query parameter
    ///
    /// `search_after` can be passed here for a single-page request via
    /// [`HypothesisClient::search_raw`](crate::client::HypothesisClient::search_raw);
    /// paged iteration always uses offsets.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Check if no constraint is set
    pub fn is_empty(&self) -> bool {
        self.user.is_none()
            && self.uri.is_none()
            && self.wildcard_uri.is_none()
            && self.text.is_none()
            && self.any.is_none()
            && self.tags.is_empty()
            && self.group.is_none()
            && self.quote.is_none()
            && self.references.is_none()
            && self.extra.is_empty()
    }

    /// Encode as query pairs, omitting unset filters
    ///
    /// A bare username is qualified with the filter's own authority, or
    /// `default_authority` when none is set. Each tag becomes its own
    /// `tag` pair.
    pub fn to_query(&self, default_authority: &str) -> QueryPairs {
        let mut pairs: QueryPairs = Vec::new();
        let mut push = |key: &str, value: Option<&str>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.to_string()));
            }
        };

        let authority = self.authority.as_deref().unwrap_or(default_authority);
        let user = self.user.as_deref().map(|u| user_acct(u, authority));

        push("user", user.as_deref());
        push("uri", self.uri.as_deref());
        push("wildcard_uri", self.wildcard_uri.as_deref());
        push("text", self.text.as_deref());
        push("any", self.any.as_deref());
        push("group", self.group.as_deref());
        push("quote", self.quote.as_deref());
        push("references", self.references.as_deref());
        push("sort", self.sort.as_ref().map(SortField::as_str));
        push("order", Some(self.order.as_str()));
        for tag in &self.tags {
            push("tag", Some(tag.as_str()));
        }

        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}
