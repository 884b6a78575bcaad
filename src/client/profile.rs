//! Profile endpoints

use super::{GroupFilter, HypothesisClient};
use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::JsonValue;
use serde_json::json;

impl HypothesisClient {
    /// Profile of the authenticated user
    pub async fn profile(&self) -> Result<JsonValue> {
        self.http.get("profile", RequestConfig::new()).await
    }

    /// Groups the authenticated user belongs to
    pub async fn profile_groups(&self, filter: &GroupFilter) -> Result<JsonValue> {
        self.http
            .get(
                "profile/groups",
                RequestConfig::new().query_pairs(filter.to_query()),
            )
            .await
    }

    /// Update profile preferences
    pub async fn update_profile(&self, preferences: JsonValue) -> Result<JsonValue> {
        self.http
            .patch(
                "profile",
                RequestConfig::new().json(json!({ "preferences": preferences })),
            )
            .await
    }
}
