//! Auth configuration types

use crate::types::{user_acct, DEFAULT_AUTHORITY};

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl AuthConfig {
    /// Create a bearer config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Check if requests will carry a credential
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Bearer { token } if !token.is_empty())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}

/// Account credentials for the Hypothesis API
#[derive(Clone)]
pub struct Credentials {
    /// Hypothesis username (may be empty for read-only use)
    pub username: String,
    /// Developer API key
    pub api_key: String,
    /// Authority domain of the account
    pub authority: String,
}

impl Credentials {
    /// Create credentials on the default authority
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            authority: DEFAULT_AUTHORITY.to_string(),
        }
    }

    /// Use a different authority
    #[must_use]
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into();
        self
    }

    /// Account id of the configured user
    pub fn acct(&self) -> String {
        user_acct(&self.username, &self.authority)
    }

    /// Account id of another user on this authority
    pub fn user_acct(&self, user: &str) -> String {
        user_acct(user, &self.authority)
    }

    /// Auth config for requests made with these credentials
    pub fn auth_config(&self) -> AuthConfig {
        if self.api_key.is_empty() {
            AuthConfig::None
        } else {
            AuthConfig::bearer(self.api_key.clone())
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"***")
            .field("authority", &self.authority)
            .finish()
    }
}
