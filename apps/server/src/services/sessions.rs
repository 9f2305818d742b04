//! Per-user session table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex as AsyncMutex;
use wordquiz_core::Session;

use crate::error::{ApiError, Result};

/// One user's quiz slot. `session` is `None` until a mode is picked.
#[derive(Debug, Default)]
pub struct UserSlot {
    pub session: Option<Session>,
    pub started_at: Option<DateTime<Utc>>,
}

/// Keyed table of user slots.
///
/// Each slot has its own async lock, so events from one user are applied
/// one at a time while different users never wait on each other.
#[derive(Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<String, Arc<AsyncMutex<UserSlot>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the slot for a user.
    pub fn slot(&self, user_id: &str) -> Result<Arc<AsyncMutex<UserSlot>>> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| ApiError::Internal("session store lock poisoned".to_string()))?;
        Ok(slots.entry(user_id.to_string()).or_default().clone())
    }

    pub fn len(&self) -> usize {
        self.slots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
