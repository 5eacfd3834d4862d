// ABOUTME: HTTP request handlers for AI document analysis
// ABOUTME: Investment, forecast and risk analysis of a stored PDF, persisted on the document

use axum::{extract::State, response::Response, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use finadvisor_ai::AnalysisCategory;
use finadvisor_documents::DocumentAnalysis;

use crate::documents_handlers::extract_document_text;
use crate::error::{ApiResult, AppError};
use crate::response::ok;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub document_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AnalysisOutcome {
    pub document_id: i64,
    pub analysis_type: AnalysisCategory,
    pub analysis: DocumentAnalysis,
}

pub async fn analyze_investment(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> ApiResult<Response> {
    analyze(&state, request, AnalysisCategory::Investment).await
}

pub async fn analyze_forecast(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> ApiResult<Response> {
    analyze(&state, request, AnalysisCategory::Forecast).await
}

pub async fn analyze_risk(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> ApiResult<Response> {
    analyze(&state, request, AnalysisCategory::Risk).await
}

/// Checks run in a fixed order and all fail before any extraction or model
/// call. Nothing is written unless the model produced a usable analysis.
async fn analyze(
    state: &AppState,
    request: AnalysisRequest,
    category: AnalysisCategory,
) -> ApiResult<Response> {
    info!(
        "Running {} analysis on document {} for user {}",
        category, request.document_id, request.user_id
    );

    let document = state.documents.get_document(request.document_id).await?;
    if !state.users.user_exists(request.user_id).await? {
        return Err(AppError::not_found("User"));
    }
    if document.user_id != request.user_id {
        return Err(AppError::forbidden(
            "User does not have access to this document",
        ));
    }

    let content = extract_document_text(&document).await?;
    let analysis = state.ai.analyze_document(category, &content.text).await?;

    state.documents.set_analysis(document.id, &analysis).await?;

    Ok(ok(AnalysisOutcome {
        document_id: document.id,
        analysis_type: category,
        analysis,
    }))
}
