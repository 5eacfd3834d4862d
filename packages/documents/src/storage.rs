// ABOUTME: Document storage layer using SQLite
// ABOUTME: CRUD for document rows including the serialized analysis result

use chrono::Utc;
use finadvisor_storage::StorageError;
use sqlx::{QueryBuilder, Row, SqlitePool};
use tracing::debug;

use crate::types::{Document, DocumentAnalysis, DocumentUpdateInput, NewDocument};

pub struct DocumentStorage {
    pool: SqlitePool,
}

impl DocumentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_document(&self, input: NewDocument) -> Result<Document, StorageError> {
        debug!("Creating document '{}' for user: {}", input.title, input.user_id);

        let result = sqlx::query(
            r#"
            INSERT INTO documents (user_id, title, category, file_type, file_path, content_base64, upload_date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.category)
        .bind(&input.file_type)
        .bind(&input.file_path)
        .bind(&input.content_base64)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.get_document(result.last_insert_rowid()).await
    }

    pub async fn get_document(&self, document_id: i64) -> Result<Document, StorageError> {
        debug!("Fetching document: {}", document_id);

        let row = sqlx::query("SELECT * FROM documents WHERE id = ?")
            .bind(document_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::NotFound("Document".to_string()))?;

        row_to_document(&row)
    }

    pub async fn list_for_user(
        &self,
        user_id: i64,
        category: Option<&str>,
    ) -> Result<Vec<Document>, StorageError> {
        debug!("Listing documents for user: {} category: {:?}", user_id, category);

        let mut query_builder = QueryBuilder::new("SELECT * FROM documents WHERE user_id = ");
        query_builder.push_bind(user_id);
        if let Some(category) = category {
            query_builder.push(" AND category = ");
            query_builder.push_bind(category);
        }
        query_builder.push(" ORDER BY upload_date DESC, id DESC");

        let rows = query_builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_document).collect()
    }

    /// Paths of every stored upload belonging to a user.
    pub async fn file_paths_for_user(&self, user_id: i64) -> Result<Vec<String>, StorageError> {
        let paths: Vec<Option<String>> =
            sqlx::query_scalar("SELECT file_path FROM documents WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(paths.into_iter().flatten().collect())
    }

    pub async fn update_document(
        &self,
        document_id: i64,
        input: DocumentUpdateInput,
    ) -> Result<Document, StorageError> {
        debug!("Updating document: {}", document_id);

        let mut query_builder = QueryBuilder::new("UPDATE documents SET ");
        let mut separated = query_builder.separated(", ");
        let mut has_updates = false;

        if let Some(title) = &input.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title);
            has_updates = true;
        }
        if let Some(category) = &input.category {
            separated.push("category = ");
            separated.push_bind_unseparated(category);
            has_updates = true;
        }
        if let Some(analysis) = &input.analysis {
            separated.push("analysis = ");
            separated.push_bind_unseparated(serde_json::to_string(analysis)?);
            has_updates = true;
        }

        if !has_updates {
            return self.get_document(document_id).await;
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(document_id);

        let result = query_builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound("Document".to_string()));
        }

        self.get_document(document_id).await
    }

    pub async fn set_analysis(
        &self,
        document_id: i64,
        analysis: &DocumentAnalysis,
    ) -> Result<Document, StorageError> {
        self.update_document(
            document_id,
            DocumentUpdateInput {
                analysis: Some(analysis.clone()),
                ..Default::default()
            },
        )
        .await
    }

    /// Delete the row and hand it back so the caller can clean up the upload.
    pub async fn delete_document(&self, document_id: i64) -> Result<Document, StorageError> {
        debug!("Deleting document: {}", document_id);

        let document = self.get_document(document_id).await?;

        sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(document_id)
            .execute(&self.pool)
            .await?;

        Ok(document)
    }
}

fn row_to_document(row: &sqlx::sqlite::SqliteRow) -> Result<Document, StorageError> {
    let analysis = row
        .try_get::<Option<String>, _>("analysis")?
        .map(|raw| serde_json::from_str::<DocumentAnalysis>(&raw))
        .transpose()?;

    Ok(Document {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        category: row.try_get("category")?,
        file_type: row.try_get("file_type")?,
        file_path: row.try_get("file_path")?,
        content_base64: row.try_get("content_base64")?,
        upload_date: row.try_get("upload_date")?,
        analysis,
    })
}
