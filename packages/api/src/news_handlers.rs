// ABOUTME: HTTP request handlers for financial news
// ABOUTME: Stored news CRUD, the news-search proxy and per-category listing with search fallback

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use finadvisor_news::{
    NewsItem, NewsItemCreate, NewsItemUpdate, NewsSearchRequest, NewsSearchResponse,
    NewsSearchResult,
};

use crate::error::{ApiResult, AppError};
use crate::response::{created, no_content, ok};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListNewsQuery {
    pub limit: Option<i64>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchNewsQuery {
    #[serde(default)]
    pub query: String,
    pub max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryNewsQuery {
    pub limit: Option<i64>,
}

/// Either stored items or live search results for a category.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CategoryNews {
    Stored(Vec<NewsItem>),
    Searched(Vec<NewsSearchResult>),
}

pub async fn create_news(
    State(state): State<AppState>,
    Json(input): Json<NewsItemCreate>,
) -> ApiResult<Response> {
    info!("Creating news item: {}", input.title);

    let item = state.news.create_item(input).await?;
    Ok(created(item))
}

pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ListNewsQuery>,
) -> ApiResult<Response> {
    let limit = query.limit.unwrap_or(10);
    info!("Listing news: limit={} category={:?}", limit, query.category);

    let items = state
        .news
        .list_items(query.category.as_deref(), limit)
        .await?;
    Ok(ok(items))
}

pub async fn get_news(
    State(state): State<AppState>,
    Path(news_id): Path<i64>,
) -> ApiResult<Response> {
    let item = state.news.get_item(news_id).await?;
    Ok(ok(item))
}

pub async fn update_news(
    State(state): State<AppState>,
    Path(news_id): Path<i64>,
    Json(input): Json<NewsItemUpdate>,
) -> ApiResult<Response> {
    info!("Updating news item: {}", news_id);

    let item = state.news.update_item(news_id, input).await?;
    Ok(ok(item))
}

pub async fn delete_news(
    State(state): State<AppState>,
    Path(news_id): Path<i64>,
) -> ApiResult<Response> {
    info!("Deleting news item: {}", news_id);

    state.news.delete_item(news_id).await?;
    Ok(no_content())
}

pub async fn search_news_get(
    State(state): State<AppState>,
    Query(query): Query<SearchNewsQuery>,
) -> ApiResult<Response> {
    let request = NewsSearchRequest::new(query.query, query.max_results);
    Ok(ok(run_search(&state, &request).await?))
}

pub async fn search_news_post(
    State(state): State<AppState>,
    Json(request): Json<NewsSearchRequest>,
) -> ApiResult<Response> {
    Ok(ok(run_search(&state, &request).await?))
}

async fn run_search(state: &AppState, request: &NewsSearchRequest) -> ApiResult<NewsSearchResponse> {
    if request.query.trim().is_empty() {
        return Err(AppError::validation("Search query must not be empty"));
    }
    info!("News search: {:?}", request.query);

    Ok(state.news_search.search(request).await?)
}

/// Stored items for a category. When nothing is stored, fall back to a live
/// search; a failed fallback yields an empty list.
pub async fn news_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CategoryNewsQuery>,
) -> ApiResult<Response> {
    let limit = query.limit.unwrap_or(5);
    info!("Listing news for category {} (limit {})", category, limit);

    let stored = state.news.list_items(Some(&category), limit).await?;
    if !stored.is_empty() || !state.news_search.is_configured() {
        return Ok(ok(CategoryNews::Stored(stored)));
    }

    let request = NewsSearchRequest::new(
        format!("India {} finance news", category),
        Some(u32::try_from(limit.max(1)).unwrap_or(u32::MAX)),
    );
    let results = match state.news_search.search(&request).await {
        Ok(response) => response.results,
        Err(e) => {
            warn!("Category search fallback failed for {}: {}", category, e);
            Vec::new()
        }
    };

    Ok(ok(CategoryNews::Searched(results)))
}
