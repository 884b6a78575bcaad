//! Group and membership endpoints

use super::{segment, GroupFilter, HypothesisClient};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::pagination::PageWindow;
use crate::types::JsonValue;
use serde_json::{json, Map};

impl HypothesisClient {
    /// List groups visible to the user
    pub async fn groups(&self, filter: &GroupFilter) -> Result<JsonValue> {
        self.http
            .get("groups", RequestConfig::new().query_pairs(filter.to_query()))
            .await
    }

    /// Create a private group
    ///
    /// `groupid` is only accepted for third-party authorities.
    pub async fn create_group(
        &self,
        name: &str,
        description: Option<&str>,
        groupid: Option<&str>,
    ) -> Result<JsonValue> {
        let mut body = Map::new();
        body.insert("name".to_string(), json!(name));
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            body.insert("description".to_string(), json!(description));
        }
        if let Some(groupid) = groupid.filter(|g| !g.is_empty()) {
            body.insert("groupid".to_string(), json!(groupid));
        }

        self.http
            .post("groups", RequestConfig::new().json(JsonValue::Object(body)))
            .await
    }

    /// Fetch one group
    pub async fn group(&self, group_id: &str, expand: &[String]) -> Result<JsonValue> {
        let mut request = RequestConfig::new();
        for field in expand {
            request = request.query("expand", field.clone());
        }
        self.http.get(&format!("groups/{group_id}"), request).await
    }

    /// Rename a group or change its description
    ///
    /// At least one of `name` and `description` must be given.
    pub async fn update_group(
        &self,
        group_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<JsonValue> {
        let mut body = Map::new();
        if let Some(name) = name {
            body.insert("name".to_string(), json!(name));
        }
        if let Some(description) = description {
            body.insert("description".to_string(), json!(description));
        }
        if body.is_empty() {
            return Err(Error::invalid_argument(
                "at least one of 'name' or 'description' must be provided",
            ));
        }

        self.http
            .patch(
                &format!("groups/{group_id}"),
                RequestConfig::new().json(JsonValue::Object(body)),
            )
            .await
    }

    /// One page of a group's annotations
    ///
    /// The response has the shape `{"meta": {"page": {"total": N}}, "data": [...]}`.
    pub async fn group_annotations(
        &self,
        group_id: &str,
        limit: u32,
        offset: u64,
    ) -> Result<JsonValue> {
        let window = PageWindow::new(offset, limit);
        self.http
            .get(
                &format!("groups/{}/annotations", segment(group_id)),
                RequestConfig::new().query_pairs(window.to_query()),
            )
            .await
    }

    /// Members of a group
    pub async fn group_members(&self, group_id: &str) -> Result<JsonValue> {
        self.http
            .get(&format!("groups/{group_id}/members"), RequestConfig::new())
            .await
    }

    /// Remove the authenticated user from a group
    pub async fn leave_group(&self, group_id: &str) -> Result<JsonValue> {
        self.http
            .delete(&format!("groups/{group_id}/members/me"), RequestConfig::new())
            .await
    }

    /// Add a user to a group, optionally with roles
    pub async fn add_group_member(
        &self,
        group_id: &str,
        userid: &str,
        roles: &[String],
    ) -> Result<JsonValue> {
        let mut body = Map::new();
        if !roles.is_empty() {
            body.insert("roles".to_string(), json!(roles));
        }
        self.http
            .post(
                &member_path(group_id, userid),
                RequestConfig::new().json(JsonValue::Object(body)),
            )
            .await
    }

    /// Membership of one user in a group
    pub async fn group_member(&self, group_id: &str, userid: &str) -> Result<JsonValue> {
        self.http
            .get(&member_path(group_id, userid), RequestConfig::new())
            .await
    }

    /// Replace a member's roles
    pub async fn update_group_member(
        &self,
        group_id: &str,
        userid: &str,
        roles: &[String],
    ) -> Result<JsonValue> {
        self.http
            .patch(
                &member_path(group_id, userid),
                RequestConfig::new().json(json!({ "roles": roles })),
            )
            .await
    }

    /// Remove a user from a group
    pub async fn remove_group_member(&self, group_id: &str, userid: &str) -> Result<JsonValue> {
        self.http
            .delete(&member_path(group_id, userid), RequestConfig::new())
            .await
    }
}

fn member_path(group_id: &str, userid: &str) -> String {
    format!("groups/{}/members/{}", segment(group_id), segment(userid))
}
