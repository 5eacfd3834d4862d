// ABOUTME: Financial entry storage layer using SQLite
// ABOUTME: CRUD and filtered listing for a user's income, expenses, investments, assets and liabilities

use chrono::Utc;
use finadvisor_storage::StorageError;
use sqlx::{QueryBuilder, Row, SqlitePool};
use tracing::debug;

use crate::types::{FinancialEntry, FinancialEntryCreate, FinancialEntryUpdate};

pub struct FinancialStorage {
    pool: SqlitePool,
}

impl FinancialStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_entry(
        &self,
        input: FinancialEntryCreate,
    ) -> Result<FinancialEntry, StorageError> {
        let category = input.validate().map_err(StorageError::InvalidInput)?;
        debug!("Creating {} entry for user: {}", category, input.user_id);

        let result = sqlx::query(
            r#"
            INSERT INTO financial_data (user_id, category, type, amount, description, recurring, frequency, date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.user_id)
        .bind(category.as_str())
        .bind(&input.entry_type)
        .bind(input.amount)
        .bind(&input.description)
        .bind(input.recurring.unwrap_or(false))
        .bind(&input.frequency)
        .bind(input.date.unwrap_or_else(Utc::now))
        .execute(&self.pool)
        .await?;

        self.get_entry(result.last_insert_rowid()).await
    }

    pub async fn get_entry(&self, entry_id: i64) -> Result<FinancialEntry, StorageError> {
        debug!("Fetching financial entry: {}", entry_id);

        let row = sqlx::query("SELECT * FROM financial_data WHERE id = ?")
            .bind(entry_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound("Financial data".to_string()))?;

        row_to_entry(&row)
    }

    pub async fn list_for_user(
        &self,
        user_id: i64,
        category: Option<&str>,
        entry_type: Option<&str>,
    ) -> Result<Vec<FinancialEntry>, StorageError> {
        debug!(
            "Listing financial entries for user: {} category: {:?} type: {:?}",
            user_id, category, entry_type
        );

        let mut query_builder = QueryBuilder::new("SELECT * FROM financial_data WHERE user_id = ");
        query_builder.push_bind(user_id);
        if let Some(category) = category {
            query_builder.push(" AND category = ");
            query_builder.push_bind(category);
        }
        if let Some(entry_type) = entry_type {
            query_builder.push(" AND type = ");
            query_builder.push_bind(entry_type);
        }
        query_builder.push(" ORDER BY date DESC, id DESC");

        let rows = query_builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_entry).collect()
    }

    pub async fn update_entry(
        &self,
        entry_id: i64,
        input: FinancialEntryUpdate,
    ) -> Result<FinancialEntry, StorageError> {
        debug!("Updating financial entry: {}", entry_id);

        input.validate().map_err(StorageError::InvalidInput)?;

        let mut query_builder = QueryBuilder::new("UPDATE financial_data SET ");
        let mut separated = query_builder.separated(", ");
        let mut has_updates = false;

        if let Some(category) = &input.category {
            separated.push("category = ");
            separated.push_bind_unseparated(category);
            has_updates = true;
        }
        if let Some(entry_type) = &input.entry_type {
            separated.push("type = ");
            separated.push_bind_unseparated(entry_type);
            has_updates = true;
        }
        if let Some(amount) = input.amount {
            separated.push("amount = ");
            separated.push_bind_unseparated(amount);
            has_updates = true;
        }
        if let Some(description) = &input.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description);
            has_updates = true;
        }
        if let Some(recurring) = input.recurring {
            separated.push("recurring = ");
            separated.push_bind_unseparated(recurring);
            has_updates = true;
        }
        if let Some(frequency) = &input.frequency {
            separated.push("frequency = ");
            separated.push_bind_unseparated(frequency);
            has_updates = true;
        }
        if let Some(date) = input.date {
            separated.push("date = ");
            separated.push_bind_unseparated(date);
            has_updates = true;
        }

        if !has_updates {
            return self.get_entry(entry_id).await;
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(entry_id);

        let result = query_builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("Financial data".to_string()));
        }

        self.get_entry(entry_id).await
    }

    pub async fn delete_entry(&self, entry_id: i64) -> Result<(), StorageError> {
        debug!("Deleting financial entry: {}", entry_id);

        let result = sqlx::query("DELETE FROM financial_data WHERE id = ?")
            .bind(entry_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("Financial data".to_string()));
        }
        Ok(())
    }
}

fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<FinancialEntry, StorageError> {
    Ok(FinancialEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        category: row.try_get("category")?,
        entry_type: row.try_get("type")?,
        amount: row.try_get("amount")?,
        description: row.try_get("description")?,
        recurring: row.try_get("recurring")?,
        frequency: row.try_get("frequency")?,
        date: row.try_get("date")?,
    })
}
