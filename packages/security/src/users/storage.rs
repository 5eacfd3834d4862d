// ABOUTME: User storage layer using SQLite
// ABOUTME: Handles CRUD operations for user accounts and their preferences

use chrono::Utc;
use finadvisor_storage::StorageError;
use sqlx::{QueryBuilder, Row, SqlitePool};
use tracing::debug;

use super::types::{User, UserCreateInput, UserPreferences, UserUpdateInput};
use crate::password::{self, PasswordError};

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, input: UserCreateInput) -> Result<User, StorageError> {
        debug!("Creating user: {}", input.username);

        input.validate().map_err(StorageError::InvalidInput)?;

        if self.username_exists(&input.username).await? {
            return Err(StorageError::Duplicate(
                "Username already registered".to_string(),
            ));
        }
        if self.email_taken(&input.email, None).await? {
            return Err(StorageError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = password::hash_password_blocking(input.password.clone())
            .await
            .map_err(map_password_error)?;
        let preferences = serde_json::to_string(&UserPreferences::default())?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, full_name, password_hash, profile_image, preferences, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.full_name)
        .bind(&password_hash)
        .bind(&input.profile_image)
        .bind(&preferences)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        self.get_user(result.last_insert_rowid()).await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, StorageError> {
        debug!("Fetching user: {}", user_id);

        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?
            .ok_or_else(|| StorageError::NotFound("User".to_string()))?;

        self.row_to_user(&row)
    }

    pub async fn user_exists(&self, user_id: i64) -> Result<bool, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        debug!("Fetching user by username: {}", username);

        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| self.row_to_user(&r)).transpose()
    }

    pub async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, StorageError> {
        debug!("Listing users: skip={} limit={}", skip, limit);

        let rows = sqlx::query("SELECT * FROM users ORDER BY id LIMIT ? OFFSET ?")
            .bind(limit.max(0))
            .bind(skip.max(0))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(|row| self.row_to_user(row)).collect()
    }

    pub async fn update_user(
        &self,
        user_id: i64,
        input: UserUpdateInput,
    ) -> Result<User, StorageError> {
        debug!("Updating user: {}", user_id);

        input.validate().map_err(StorageError::InvalidInput)?;
        let existing = self.get_user(user_id).await?;

        if let Some(email) = &input.email {
            if self.email_taken(email, Some(user_id)).await? {
                return Err(StorageError::Duplicate("Email already registered".to_string()));
            }
        }

        // Column names are literals; values go through push_bind.
        let mut query_builder = QueryBuilder::new("UPDATE users SET updated_at = ");
        query_builder.push_bind(Utc::now());

        if let Some(email) = &input.email {
            query_builder.push(", email = ");
            query_builder.push_bind(email);
        }
        if let Some(full_name) = &input.full_name {
            query_builder.push(", full_name = ");
            query_builder.push_bind(full_name);
        }
        if let Some(profile_image) = &input.profile_image {
            query_builder.push(", profile_image = ");
            query_builder.push_bind(profile_image);
        }
        if let Some(update) = input.preferences {
            let mut preferences = existing.preferences;
            preferences.merge(update);
            query_builder.push(", preferences = ");
            query_builder.push_bind(serde_json::to_string(&preferences)?);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(user_id);

        query_builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        self.get_user(user_id).await
    }

    /// Delete a user; documents, chat messages and financial entries cascade.
    pub async fn delete_user(&self, user_id: i64) -> Result<(), StorageError> {
        debug!("Deleting user: {}", user_id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("User".to_string()));
        }
        Ok(())
    }

    /// Look up a user by username and check the password.
    /// Returns `None` for an unknown username or a wrong password.
    pub async fn verify_credentials(
        &self,
        username: &str,
        candidate: &str,
    ) -> Result<Option<User>, StorageError> {
        let Some(user) = self.get_user_by_username(username).await? else {
            return Ok(None);
        };

        let matches =
            password::verify_password_blocking(candidate.to_string(), user.password_hash.clone())
                .await
                .map_err(map_password_error)?;
        Ok(matches.then_some(user))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn email_taken(&self, email: &str, except: Option<i64>) -> Result<bool, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ? AND id != ?")
                .bind(email)
                .bind(except.unwrap_or(-1))
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    fn row_to_user(&self, row: &sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
        let preferences = row
            .try_get::<Option<String>, _>("preferences")?
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            password_hash: row.try_get("password_hash")?,
            profile_image: row.try_get("profile_image")?,
            preferences,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

fn map_password_error(err: PasswordError) -> StorageError {
    match err {
        PasswordError::Empty => StorageError::InvalidInput(err.to_string()),
        other => StorageError::Hashing(other.to_string()),
    }
}

/// Concurrent creates can slip past the pre-checks; the UNIQUE index has the last word.
fn map_unique_violation(err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            if message.contains("users.username") {
                return StorageError::Duplicate("Username already registered".to_string());
            }
            if message.contains("users.email") {
                return StorageError::Duplicate("Email already registered".to_string());
            }
        }
    }
    StorageError::Sqlx(err)
}
