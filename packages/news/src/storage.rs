// ABOUTME: News item storage layer using SQLite
// ABOUTME: Global (unowned) news items listed newest-first by publish date

use chrono::Utc;
use finadvisor_storage::StorageError;
use sqlx::{QueryBuilder, Row, SqlitePool};
use tracing::debug;

use crate::types::{NewsItem, NewsItemCreate, NewsItemUpdate};

pub struct NewsStorage {
    pool: SqlitePool,
}

impl NewsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_item(&self, input: NewsItemCreate) -> Result<NewsItem, StorageError> {
        debug!("Creating news item: {}", input.title);

        let result = sqlx::query(
            r#"
            INSERT INTO news_items (title, content, source, url, publish_date, category, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.source)
        .bind(&input.url)
        .bind(input.publish_date)
        .bind(&input.category)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.get_item(result.last_insert_rowid()).await
    }

    pub async fn get_item(&self, news_id: i64) -> Result<NewsItem, StorageError> {
        let row = sqlx::query("SELECT * FROM news_items WHERE id = ?")
            .bind(news_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound("News item".to_string()))?;

        row_to_item(&row)
    }

    pub async fn list_items(
        &self,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<NewsItem>, StorageError> {
        debug!("Listing news items: category={:?} limit={}", category, limit);

        let mut query_builder = QueryBuilder::new("SELECT * FROM news_items");
        if let Some(category) = category {
            query_builder.push(" WHERE category = ");
            query_builder.push_bind(category);
        }
        query_builder.push(" ORDER BY publish_date DESC, id DESC LIMIT ");
        query_builder.push_bind(limit.max(0));

        let rows = query_builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_item).collect()
    }

    pub async fn update_item(
        &self,
        news_id: i64,
        input: NewsItemUpdate,
    ) -> Result<NewsItem, StorageError> {
        debug!("Updating news item: {}", news_id);

        let mut query_builder = QueryBuilder::new("UPDATE news_items SET ");
        let mut separated = query_builder.separated(", ");
        let mut has_updates = false;

        if let Some(title) = &input.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title);
            has_updates = true;
        }
        if let Some(content) = &input.content {
            separated.push("content = ");
            separated.push_bind_unseparated(content);
            has_updates = true;
        }
        if let Some(source) = &input.source {
            separated.push("source = ");
            separated.push_bind_unseparated(source);
            has_updates = true;
        }
        if let Some(url) = &input.url {
            separated.push("url = ");
            separated.push_bind_unseparated(url);
            has_updates = true;
        }
        if let Some(publish_date) = input.publish_date {
            separated.push("publish_date = ");
            separated.push_bind_unseparated(publish_date);
            has_updates = true;
        }
        if let Some(category) = &input.category {
            separated.push("category = ");
            separated.push_bind_unseparated(category);
            has_updates = true;
        }

        if !has_updates {
            return self.get_item(news_id).await;
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(news_id);

        let result = query_builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("News item".to_string()));
        }

        self.get_item(news_id).await
    }

    pub async fn delete_item(&self, news_id: i64) -> Result<(), StorageError> {
        debug!("Deleting news item: {}", news_id);

        let result = sqlx::query("DELETE FROM news_items WHERE id = ?")
            .bind(news_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("News item".to_string()));
        }
        Ok(())
    }
}

fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> Result<NewsItem, StorageError> {
    Ok(NewsItem {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        source: row.try_get("source")?,
        url: row.try_get("url")?,
        publish_date: row.try_get("publish_date")?,
        category: row.try_get("category")?,
        created_at: row.try_get("created_at")?,
    })
}
