// ABOUTME: News type definitions
// ABOUTME: Stored news items and the search request/response shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub source: String,
    pub url: String,
    pub publish_date: DateTime<Utc>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsItemCreate {
    pub title: String,
    pub content: String,
    pub source: String,
    pub url: String,
    pub publish_date: DateTime<Utc>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsItemUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

pub const DEFAULT_SEARCH_RESULTS: u32 = 5;
/// Largest result count the search provider accepts.
pub const MAX_SEARCH_RESULTS: u32 = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct NewsSearchRequest {
    pub query: String,
    #[serde(default)]
    pub max_results: Option<u32>,
}

impl NewsSearchRequest {
    pub fn new(query: impl Into<String>, max_results: Option<u32>) -> Self {
        Self {
            query: query.into(),
            max_results,
        }
    }

    /// Requested result count clamped to `1..=MAX_SEARCH_RESULTS`.
    pub fn result_limit(&self) -> u32 {
        self.max_results
            .unwrap_or(DEFAULT_SEARCH_RESULTS)
            .clamp(1, MAX_SEARCH_RESULTS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSearchResult {
    pub title: String,
    pub content: String,
    pub url: String,
    pub publish_date: String,
    pub source: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSearchResponse {
    pub results: Vec<NewsSearchResult>,
    /// The query as the caller sent it, before regional terms were added.
    pub query: String,
}
