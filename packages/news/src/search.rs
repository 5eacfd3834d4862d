// ABOUTME: Client for the external news-search provider
// ABOUTME: Scopes queries to Indian markets and a fixed set of financial publications

use chrono::Utc;
use finadvisor_core::NewsSearchConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::types::{NewsSearchRequest, NewsSearchResponse, NewsSearchResult};

const QUERY_SUFFIX: &str = "India finance market NSE BSE";
const SEARCH_DEPTH: &str = "advanced";
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const INCLUDED_DOMAINS: [&str; 5] = [
    "economictimes.indiatimes.com",
    "financialexpress.com",
    "moneycontrol.com",
    "livemint.com",
    "businesstoday.in",
];

#[derive(Debug, Error)]
pub enum NewsSearchError {
    #[error("News search API key not configured")]
    NotConfigured,

    #[error("Search query must not be empty")]
    EmptyQuery,

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("News search API error: {0}")]
    ApiError(String),

    #[error("Failed to parse news search response: {0}")]
    ParseError(String),
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: String,
    search_depth: &'a str,
    max_results: u32,
    include_domains: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    url: String,
    published_date: Option<String>,
    #[serde(default)]
    source: String,
    #[serde(default)]
    score: f64,
}

pub struct NewsSearchClient {
    client: Client,
    config: NewsSearchConfig,
}

impl NewsSearchClient {
    pub fn new(config: NewsSearchConfig) -> Result<Self, NewsSearchError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub async fn search(
        &self,
        request: &NewsSearchRequest,
    ) -> Result<NewsSearchResponse, NewsSearchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NewsSearchError::NotConfigured)?;

        let query = request.query.trim();
        if query.is_empty() {
            return Err(NewsSearchError::EmptyQuery);
        }

        let body = SearchRequest {
            api_key,
            query: format!("{} {}", query, QUERY_SUFFIX),
            search_depth: SEARCH_DEPTH,
            max_results: request.result_limit(),
            include_domains: &INCLUDED_DOMAINS,
        };

        info!("Searching news: query={:?} max_results={}", query, body.max_results);

        let response = self
            .client
            .post(format!("{}/search", self.config.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("News search request failed: {}", e);
                NewsSearchError::RequestFailed(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("News search API error: {} - {}", status, error_text);
            return Err(NewsSearchError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| NewsSearchError::ParseError(e.to_string()))?;

        let fetched_at = Utc::now().to_rfc3339();
        let results = parsed
            .results
            .into_iter()
            .map(|hit| NewsSearchResult {
                title: hit.title,
                content: hit.content,
                url: hit.url,
                publish_date: hit.published_date.unwrap_or_else(|| fetched_at.clone()),
                source: hit.source,
                score: hit.score,
            })
            .collect();

        Ok(NewsSearchResponse {
            results,
            query: request.query.clone(),
        })
    }
}
