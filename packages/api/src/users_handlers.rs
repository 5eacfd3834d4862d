// ABOUTME: HTTP request handlers for user operations
// ABOUTME: Registration, paged listing, profile and preference updates, cascading deletion

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::info;

use finadvisor_documents::uploads::remove_upload;
use finadvisor_security::{UserCreateInput, UserUpdateInput};

use crate::error::ApiResult;
use crate::response::{created, no_content, ok};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserCreateInput>,
) -> ApiResult<Response> {
    info!("Creating user: {}", input.username);

    let user = state.users.create_user(input).await?;
    Ok(created(user))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Response> {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(100);
    info!("Listing users: skip={} limit={}", skip, limit);

    let users = state.users.list_users(skip, limit).await?;
    Ok(ok(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Getting user: {}", user_id);

    let user = state.users.get_user(user_id).await?;
    Ok(ok(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(input): Json<UserUpdateInput>,
) -> ApiResult<Response> {
    info!("Updating user: {}", user_id);

    let user = state.users.update_user(user_id, input).await?;
    Ok(ok(user))
}

/// Delete a user with everything they own, then clean their uploads off disk.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Deleting user: {}", user_id);

    state.users.get_user(user_id).await?;
    let file_paths = state.documents.file_paths_for_user(user_id).await?;

    state.users.delete_user(user_id).await?;

    for path in &file_paths {
        remove_upload(path).await;
    }

    Ok(no_content())
}
