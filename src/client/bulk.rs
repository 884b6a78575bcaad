//! Bulk and analytics endpoints
//!
//! The bulk endpoints are only open to admin and LMS integrations;
//! other credentials get a 404.

use super::{BulkAnnotationFilter, BulkGroupFilter, HypothesisClient};
use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::JsonValue;
use serde_json::{json, Map};

impl HypothesisClient {
    /// Run several operations in one call
    pub async fn bulk(&self, operations: Vec<JsonValue>) -> Result<JsonValue> {
        self.http
            .post("bulk", RequestConfig::new().json(JsonValue::Array(operations)))
            .await
    }

    /// Retrieve many annotations at once
    pub async fn bulk_annotations(&self, filter: &BulkAnnotationFilter) -> Result<JsonValue> {
        self.http
            .post(
                "bulk/annotation",
                RequestConfig::new().json(serde_json::to_value(filter)?),
            )
            .await
    }

    /// Retrieve many groups at once
    pub async fn bulk_groups(&self, filter: &BulkGroupFilter) -> Result<JsonValue> {
        self.http
            .post(
                "bulk/group",
                RequestConfig::new().json(serde_json::to_value(filter)?),
            )
            .await
    }

    /// Annotation metrics for LMS groups
    pub async fn bulk_lms_annotations(
        &self,
        group_ids: &[String],
        assignment_id: Option<&str>,
        course_id: Option<&str>,
    ) -> Result<JsonValue> {
        let mut body = Map::new();
        body.insert("group_ids".to_string(), json!(group_ids));
        if let Some(assignment_id) = assignment_id {
            body.insert("assignment_id".to_string(), json!(assignment_id));
        }
        if let Some(course_id) = course_id {
            body.insert("course_id".to_string(), json!(course_id));
        }
        self.http
            .post(
                "bulk/lms/annotations",
                RequestConfig::new().json(JsonValue::Object(body)),
            )
            .await
    }

    /// Record an analytics event
    ///
    /// The API only accepts a fixed set of event names.
    pub async fn create_analytics_event(
        &self,
        event: &str,
        properties: Option<JsonValue>,
    ) -> Result<JsonValue> {
        let mut body = Map::new();
        body.insert("event".to_string(), json!(event));
        if let Some(properties) = properties {
            body.insert("properties".to_string(), properties);
        }
        self.http
            .post(
                "analytics/events",
                RequestConfig::new().json(JsonValue::Object(body)),
            )
            .await
    }
}
