//! Shared-password access gate.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ApiError, Result};

/// A user who has entered the access password.
#[derive(Debug, Clone)]
pub struct AuthorizedUser {
    pub user_id: String,
    pub authorized_at: DateTime<Utc>,
}

/// Issues bearer tokens to users who know the password. Tokens live in
/// memory and are lost on restart.
pub struct AccessGate {
    password: String,
    tokens: RwLock<HashMap<String, AuthorizedUser>>,
}

impl AccessGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Check the password and hand out a token for `user_id`.
    pub fn login(&self, user_id: &str, password: &str) -> Result<String> {
        if user_id.trim().is_empty() {
            return Err(ApiError::BadRequest("user_id must not be empty".to_string()));
        }
        if password.trim() != self.password {
            tracing::info!(user_id, "Rejected login attempt");
            return Err(ApiError::Unauthorized("Wrong password".to_string()));
        }

        let token = Uuid::new_v4().to_string();
        let user = AuthorizedUser {
            user_id: user_id.to_string(),
            authorized_at: Utc::now(),
        };
        self.tokens
            .write()
            .map_err(|_| ApiError::Internal("access gate lock poisoned".to_string()))?
            .insert(token.clone(), user);

        tracing::info!(user_id, "Authorized user");
        Ok(token)
    }

    /// Resolve a bearer token to its user.
    pub fn resolve(&self, token: &str) -> Option<AuthorizedUser> {
        self.tokens.read().ok()?.get(token).cloned()
    }
}
