// ABOUTME: HTTP request handlers for financial data entries
// ABOUTME: Entry CRUD with category/type filters and the per-user financial summary

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use finadvisor_finance::{summarize, FinancialEntryCreate, FinancialEntryUpdate};

use crate::error::{ApiResult, AppError};
use crate::response::{created, no_content, ok};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(input): Json<FinancialEntryCreate>,
) -> ApiResult<Response> {
    info!(
        "Creating {} entry for user {}",
        input.category, input.user_id
    );

    if !state.users.user_exists(input.user_id).await? {
        return Err(AppError::not_found("User"));
    }

    let entry = state.finance.create_entry(input).await?;
    Ok(created(entry))
}

pub async fn list_user_entries(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ListEntriesQuery>,
) -> ApiResult<Response> {
    info!("Listing financial entries for user {}", user_id);

    if !state.users.user_exists(user_id).await? {
        return Err(AppError::not_found("User"));
    }

    let entries = state
        .finance
        .list_for_user(user_id, query.category.as_deref(), query.entry_type.as_deref())
        .await?;
    Ok(ok(entries))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
) -> ApiResult<Response> {
    let entry = state.finance.get_entry(entry_id).await?;
    Ok(ok(entry))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
    Json(input): Json<FinancialEntryUpdate>,
) -> ApiResult<Response> {
    info!("Updating financial entry: {}", entry_id);

    let entry = state.finance.update_entry(entry_id, input).await?;
    Ok(ok(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Deleting financial entry: {}", entry_id);

    state.finance.delete_entry(entry_id).await?;
    Ok(no_content())
}

pub async fn get_summary(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Building financial summary for user {}", user_id);

    if !state.users.user_exists(user_id).await? {
        return Err(AppError::not_found("User"));
    }

    let entries = state.finance.list_for_user(user_id, None, None).await?;
    Ok(ok(summarize(&entries, Utc::now())))
}
