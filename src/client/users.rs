//! User endpoints
//!
//! These require an authority-level admin credential.

use super::{HypothesisClient, NewUser};
use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::JsonValue;
use serde_json::{json, Map};

impl HypothesisClient {
    /// Create a user
    pub async fn create_user(&self, user: &NewUser) -> Result<JsonValue> {
        self.http
            .post("users", RequestConfig::new().json(serde_json::to_value(user)?))
            .await
    }

    /// Fetch a user by `acct:` id
    pub async fn user(&self, userid: &str) -> Result<JsonValue> {
        self.http
            .get(&format!("users/{userid}"), RequestConfig::new())
            .await
    }

    /// Update a user's email or display name
    pub async fn update_user(
        &self,
        userid: &str,
        email: Option<&str>,
        display_name: Option<&str>,
    ) -> Result<JsonValue> {
        let mut body = Map::new();
        if let Some(email) = email {
            body.insert("email".to_string(), json!(email));
        }
        if let Some(display_name) = display_name {
            body.insert("display_name".to_string(), json!(display_name));
        }
        self.http
            .patch(
                &format!("users/{userid}"),
                RequestConfig::new().json(JsonValue::Object(body)),
            )
            .await
    }
}
