//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use wordquiz_core::{Mode, Reply, SessionState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// One entry of the mode menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeOption {
    pub mode: Mode,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModesResponse {
    pub modes: Vec<ModeOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectModeRequest {
    pub mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub text: String,
}

/// Messages to show the user, in order.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<String>,
    pub replies: Vec<Reply>,
    pub state: SessionState,
}

impl MessagesResponse {
    pub fn new(replies: Vec<Reply>, state: SessionState) -> Self {
        Self {
            messages: replies.iter().map(ToString::to_string).collect(),
            replies,
            state,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub mode: Mode,
    pub state: SessionState,
    pub position: usize,
    pub total: usize,
    pub score: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}
