// ABOUTME: Financial news for the Financial Advisor API
// ABOUTME: Stored news items plus a client for the external news-search provider

pub mod search;
pub mod storage;
pub mod types;

pub use search::{NewsSearchClient, NewsSearchError};
pub use storage::NewsStorage;
pub use types::{
    NewsItem, NewsItemCreate, NewsItemUpdate, NewsSearchRequest, NewsSearchResponse,
    NewsSearchResult,
};
