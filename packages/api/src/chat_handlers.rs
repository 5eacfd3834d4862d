// ABOUTME: HTTP request handlers for the advisor chat
// ABOUTME: A chat turn always stores exactly one advisor reply, falling back to an apology

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use finadvisor_ai::ChatMessage as PromptMessage;
use finadvisor_chat::{ChatMessage, ChatMessageCreate, NewChatMessage};

use crate::error::{ApiResult, AppError};
use crate::response::{created, no_content, ok};
use crate::state::AppState;

/// Prior messages sent to the model with each turn.
const HISTORY_WINDOW: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct ListMessagesQuery {
    pub limit: Option<i64>,
}

pub fn apology(reason: &str) -> String {
    format!(
        "I apologize, but I am unable to respond at the moment. Error: {}",
        reason
    )
}

fn to_prompt_message(message: &ChatMessage) -> PromptMessage {
    if message.is_user {
        PromptMessage::user(message.message.clone())
    } else {
        PromptMessage::assistant(message.message.clone())
    }
}

/// Run one chat turn and return the stored advisor reply.
pub async fn send_message(
    State(state): State<AppState>,
    Json(input): Json<ChatMessageCreate>,
) -> ApiResult<Response> {
    info!("Chat turn for user {}", input.user_id);

    if input.message.trim().is_empty() {
        return Err(AppError::validation("Message must not be empty"));
    }
    if !state.users.user_exists(input.user_id).await? {
        return Err(AppError::not_found("User"));
    }

    let user_message = state
        .chat
        .append_message(NewChatMessage::from_user(
            input.user_id,
            input.message.clone(),
            input.related_to.clone(),
        ))
        .await?;

    let history: Vec<PromptMessage> = state
        .chat
        .history_before(input.user_id, user_message.id, HISTORY_WINDOW)
        .await?
        .iter()
        .map(to_prompt_message)
        .collect();

    let reply_text = match state
        .ai
        .chat_reply(&input.message, &history, input.related_to.as_deref())
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "Model reply failed for user {}, storing fallback: {}",
                input.user_id, e
            );
            apology(&e.to_string())
        }
    };

    let reply = state
        .chat
        .append_message(NewChatMessage::from_advisor(
            input.user_id,
            reply_text,
            input.related_to,
        ))
        .await?;

    Ok(created(reply))
}

pub async fn list_user_messages(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ListMessagesQuery>,
) -> ApiResult<Response> {
    let limit = query.limit.unwrap_or(20);
    info!("Listing {} chat messages for user {}", limit, user_id);

    if !state.users.user_exists(user_id).await? {
        return Err(AppError::not_found("User"));
    }

    let messages = state.chat.list_recent(user_id, limit).await?;
    Ok(ok(messages))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> ApiResult<Response> {
    let message = state.chat.get_message(message_id).await?;
    Ok(ok(message))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Deleting chat message: {}", message_id);

    state.chat.delete_message(message_id).await?;
    Ok(no_content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use finadvisor_ai::Role;

    #[test]
    fn test_apology_carries_reason() {
        let text = apology("Model request timed out after 60 seconds");
        assert!(text.starts_with("I apologize, but I am unable to respond at the moment."));
        assert!(text.ends_with("Error: Model request timed out after 60 seconds"));
    }

    #[test]
    fn test_stored_messages_map_to_roles() {
        let stored = |is_user| ChatMessage {
            id: 1,
            user_id: 1,
            message: "hello".to_string(),
            is_user,
            related_to: None,
            timestamp: Utc::now(),
        };

        assert_eq!(to_prompt_message(&stored(true)).role, Role::User);
        assert_eq!(to_prompt_message(&stored(false)).role, Role::Assistant);
    }
}
