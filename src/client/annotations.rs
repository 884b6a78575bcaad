//! Annotation endpoints

use super::{HypothesisClient, NewAnnotation};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::types::{JsonObject, JsonValue, ModerationStatus, PUBLIC_GROUP};
use serde_json::json;
use tracing::debug;

impl HypothesisClient {
    /// Create an annotation from a raw JSON payload
    ///
    /// The payload must contain `uri`. The authenticated user is set as
    /// `user`; `group` defaults to `group` (or the public group) when the
    /// payload has none. Missing `permissions` default to readable by the
    /// group and writable by the user only; missing `document` to `{}`.
    pub async fn create_annotation(
        &self,
        payload: JsonValue,
        group: Option<&str>,
    ) -> Result<JsonValue> {
        let body = self.annotation_payload(payload, group)?;
        debug!("Creating annotation on {}", body["uri"]);
        self.http
            .post("annotations", RequestConfig::new().json(body))
            .await
    }

    /// Create an annotation from a typed draft
    pub async fn create(&self, annotation: &NewAnnotation) -> Result<JsonValue> {
        self.create_annotation(annotation.to_payload(), None).await
    }

    pub(super) fn annotation_payload(
        &self,
        payload: JsonValue,
        group: Option<&str>,
    ) -> Result<JsonValue> {
        let JsonValue::Object(mut body) = payload else {
            return Err(Error::invalid_argument("annotation payload must be a JSON object"));
        };
        if !body.contains_key("uri") {
            return Err(Error::invalid_argument("annotation payload must include 'uri'"));
        }

        let acct = self.credentials.acct();
        body.insert("user".to_string(), JsonValue::String(acct.clone()));

        if !body.contains_key("group") {
            let group = group.unwrap_or(PUBLIC_GROUP);
            body.insert("group".to_string(), JsonValue::String(group.to_string()));
        }
        let effective_group = body["group"].as_str().unwrap_or(PUBLIC_GROUP).to_string();

        if !body.contains_key("permissions") {
            body.insert(
                "permissions".to_string(),
                json!({
                    "read": [format!("group:{effective_group}")],
                    "update": [acct],
                    "delete": [acct],
                    "admin": [acct],
                }),
            );
        }

        if !body.contains_key("document") {
            body.insert("document".to_string(), JsonValue::Object(JsonObject::new()));
        }

        Ok(JsonValue::Object(body))
    }

    /// Fetch one annotation
    ///
    /// Private and group annotations need `authenticated`.
    pub async fn get_annotation(&self, id: &str, authenticated: bool) -> Result<JsonValue> {
        let mut request = RequestConfig::new();
        if !authenticated {
            request = request.unauthenticated();
        }
        self.http.get(&format!("annotations/{id}"), request).await
    }

    /// Update fields of an annotation
    pub async fn update_annotation(&self, id: &str, payload: JsonValue) -> Result<JsonValue> {
        self.http
            .patch(&format!("annotations/{id}"), RequestConfig::new().json(payload))
            .await
    }

    /// Delete an annotation
    pub async fn delete_annotation(&self, id: &str) -> Result<JsonValue> {
        self.http
            .delete(&format!("annotations/{id}"), RequestConfig::new())
            .await
    }

    /// Flag an annotation for moderator review
    pub async fn flag(&self, id: &str) -> Result<JsonValue> {
        self.http
            .put(&format!("annotations/{id}/flag"), RequestConfig::new())
            .await
    }

    /// Hide an annotation (moderators only)
    pub async fn hide(&self, id: &str) -> Result<JsonValue> {
        self.http
            .put(&format!("annotations/{id}/hide"), RequestConfig::new())
            .await
    }

    /// Unhide an annotation (moderators only)
    pub async fn unhide(&self, id: &str) -> Result<JsonValue> {
        self.http
            .delete(&format!("annotations/{id}/hide"), RequestConfig::new())
            .await
    }

    /// Reindex an annotation in the search index (admin only)
    pub async fn reindex(&self, id: &str) -> Result<JsonValue> {
        self.http
            .post(&format!("annotations/{id}/reindex"), RequestConfig::new())
            .await
    }

    /// Set the moderation status of an annotation
    pub async fn moderate(
        &self,
        id: &str,
        status: ModerationStatus,
        annotation_updated: bool,
    ) -> Result<JsonValue> {
        let body = json!({
            "moderation_status": status.as_str(),
            "annotation_updated": annotation_updated,
        });
        self.http
            .patch(
                &format!("annotations/{id}/moderation"),
                RequestConfig::new().json(body),
            )
            .await
    }
}
