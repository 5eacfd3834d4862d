// ABOUTME: Chat message type definitions
// ABOUTME: Stored messages and the inbound request for a chat turn

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub is_user: bool,
    pub related_to: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Request body for a chat turn
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageCreate {
    pub user_id: i64,
    pub message: String,
    #[serde(default)]
    pub related_to: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub user_id: i64,
    pub message: String,
    pub is_user: bool,
    pub related_to: Option<String>,
}

impl NewChatMessage {
    pub fn from_user(user_id: i64, message: impl Into<String>, related_to: Option<String>) -> Self {
        Self {
            user_id,
            message: message.into(),
            is_user: true,
            related_to,
        }
    }

    pub fn from_advisor(user_id: i64, message: impl Into<String>, related_to: Option<String>) -> Self {
        Self {
            user_id,
            message: message.into(),
            is_user: false,
            related_to,
        }
    }
}
