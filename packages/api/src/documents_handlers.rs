// ABOUTME: HTTP request handlers for document operations
// ABOUTME: JSON PDF uploads, listing, updates, deletion, text extraction and data URLs

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use finadvisor_documents::pdf::decode_base64_payload;
use finadvisor_documents::uploads::{remove_upload, save_upload, upload_file_name};
use finadvisor_documents::{
    extract_pdf_content, pdf_data_url, Document, DocumentUpdateInput, DocumentUpload,
    NewDocument, PdfContent,
};

use crate::error::{ApiResult, AppError};
use crate::response::{created, no_content, ok};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DataUrlResponse {
    pub data_url: String,
}

pub async fn upload_document(
    State(state): State<AppState>,
    Json(upload): Json<DocumentUpload>,
) -> ApiResult<Response> {
    info!(
        "Uploading document '{}' for user {}",
        upload.file_name, upload.user_id
    );

    if !state.users.user_exists(upload.user_id).await? {
        return Err(AppError::not_found("User"));
    }
    if !upload.is_pdf() {
        return Err(AppError::validation("Only PDF files are allowed"));
    }

    let bytes = decode_base64_payload(&upload.content_base64)?;
    let file_name = upload_file_name(&upload.file_name, Utc::now());
    let path = save_upload(&state.config.upload_dir, &file_name, &bytes)
        .await
        .map_err(|e| AppError::internal(anyhow::Error::new(e).context("Failed to save upload")))?;

    let file_path = path.to_string_lossy().into_owned();
    let inserted = state
        .documents
        .create_document(NewDocument {
            user_id: upload.user_id,
            title: upload.title,
            category: upload.category,
            file_type: "pdf".to_string(),
            file_path: Some(file_path.clone()),
            content_base64: Some(upload.content_base64),
        })
        .await;

    match inserted {
        Ok(document) => Ok(created(document)),
        Err(e) => {
            // Nothing references the file once the insert fails.
            remove_upload(&file_path).await;
            Err(e.into())
        }
    }
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Getting document: {}", document_id);

    let document = state.documents.get_document(document_id).await?;
    Ok(ok(document))
}

pub async fn list_user_documents(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ListDocumentsQuery>,
) -> ApiResult<Response> {
    info!("Listing documents for user {}", user_id);

    if !state.users.user_exists(user_id).await? {
        return Err(AppError::not_found("User"));
    }

    let documents = state
        .documents
        .list_for_user(user_id, query.category.as_deref())
        .await?;
    Ok(ok(documents))
}

pub async fn update_document(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
    Json(input): Json<DocumentUpdateInput>,
) -> ApiResult<Response> {
    info!("Updating document: {}", document_id);

    let document = state.documents.update_document(document_id, input).await?;
    Ok(ok(document))
}

/// Delete the row first; a file that cannot be removed is only logged.
pub async fn delete_document(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Deleting document: {}", document_id);

    let document = state.documents.delete_document(document_id).await?;
    if let Some(path) = &document.file_path {
        remove_upload(path).await;
    }

    Ok(no_content())
}

pub async fn get_document_content(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Extracting content of document: {}", document_id);

    let document = state.documents.get_document(document_id).await?;
    let content = extract_document_text(&document).await?;
    Ok(ok(content))
}

pub async fn get_document_data_url(
    State(state): State<AppState>,
    Path(document_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Building data URL for document: {}", document_id);

    let document = state.documents.get_document(document_id).await?;
    let payload = stored_payload(&document)?;
    Ok(ok(DataUrlResponse {
        data_url: pdf_data_url(payload),
    }))
}

fn stored_payload(document: &Document) -> ApiResult<&str> {
    document
        .content_base64
        .as_deref()
        .filter(|payload| !payload.trim().is_empty())
        .ok_or_else(|| AppError::validation("Document content not available"))
}

/// Extract text off the async runtime; parsing large PDFs is CPU bound.
pub(crate) async fn extract_document_text(document: &Document) -> ApiResult<PdfContent> {
    let payload = stored_payload(document)?.to_string();

    let content = tokio::task::spawn_blocking(move || extract_pdf_content(&payload))
        .await
        .map_err(AppError::internal)??;
    Ok(content)
}
