// ABOUTME: Chat message storage layer using SQLite
// ABOUTME: Appends turns and reads per-user history windows

use chrono::Utc;
use finadvisor_storage::StorageError;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::types::{ChatMessage, NewChatMessage};

pub struct ChatStorage {
    pool: SqlitePool,
}

impl ChatStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn append_message(&self, input: NewChatMessage) -> Result<ChatMessage, StorageError> {
        debug!(
            "Appending {} message for user: {}",
            if input.is_user { "user" } else { "advisor" },
            input.user_id
        );

        let result = sqlx::query(
            r#"
            INSERT INTO chat_messages (user_id, message, is_user, related_to, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.user_id)
        .bind(&input.message)
        .bind(input.is_user)
        .bind(&input.related_to)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.get_message(result.last_insert_rowid()).await
    }

    pub async fn get_message(&self, message_id: i64) -> Result<ChatMessage, StorageError> {
        let row = sqlx::query("SELECT * FROM chat_messages WHERE id = ?")
            .bind(message_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound("Chat message".to_string()))?;

        row_to_message(&row)
    }

    /// Most recent messages for a user, newest first.
    pub async fn list_recent(&self, user_id: i64, limit: i64) -> Result<Vec<ChatMessage>, StorageError> {
        debug!("Listing {} recent messages for user: {}", limit, user_id);

        let rows = sqlx::query(
            "SELECT * FROM chat_messages WHERE user_id = ? ORDER BY timestamp DESC, id DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_message).collect()
    }

    /// Up to `limit` messages stored before `before_id`, in chronological order.
    pub async fn history_before(
        &self,
        user_id: i64,
        before_id: i64,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM chat_messages
            WHERE user_id = ? AND id < ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(before_id)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        let mut history = rows
            .iter()
            .map(row_to_message)
            .collect::<Result<Vec<_>, _>>()?;
        history.reverse();
        Ok(history)
    }

    pub async fn delete_message(&self, message_id: i64) -> Result<(), StorageError> {
        debug!("Deleting chat message: {}", message_id);

        let result = sqlx::query("DELETE FROM chat_messages WHERE id = ?")
            .bind(message_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("Chat message".to_string()));
        }
        Ok(())
    }
}

fn row_to_message(row: &sqlx::sqlite::SqliteRow) -> Result<ChatMessage, StorageError> {
    Ok(ChatMessage {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        message: row.try_get("message")?,
        is_user: row.try_get("is_user")?,
        related_to: row.try_get("related_to")?,
        timestamp: row.try_get("timestamp")?,
    })
}
