// ABOUTME: HTTP API layer for the Financial Advisor API providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

pub mod analysis_handlers;
pub mod chat_handlers;
pub mod documents_handlers;
pub mod error;
pub mod financial_handlers;
pub mod handlers;
pub mod news_handlers;
pub mod response;
pub mod state;
pub mod users_handlers;

pub use error::{ApiResult, AppError};
pub use response::ApiResponse;
pub use state::AppState;

/// Creates the users API router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(users_handlers::create_user))
        .route("/", get(users_handlers::list_users))
        .route("/{user_id}", get(users_handlers::get_user))
        .route("/{user_id}", put(users_handlers::update_user))
        .route("/{user_id}", delete(users_handlers::delete_user))
}

/// Creates the documents API router
pub fn create_documents_router() -> Router<AppState> {
    Router::new()
        .route("/", post(documents_handlers::upload_document))
        .route("/user/{user_id}", get(documents_handlers::list_user_documents))
        .route("/{document_id}", get(documents_handlers::get_document))
        .route("/{document_id}", put(documents_handlers::update_document))
        .route("/{document_id}", delete(documents_handlers::delete_document))
        .route(
            "/{document_id}/content",
            get(documents_handlers::get_document_content),
        )
        .route(
            "/{document_id}/data-url",
            get(documents_handlers::get_document_data_url),
        )
}

/// Creates the chat API router
pub fn create_chat_router() -> Router<AppState> {
    Router::new()
        .route("/", post(chat_handlers::send_message))
        .route("/user/{user_id}", get(chat_handlers::list_user_messages))
        .route("/{message_id}", get(chat_handlers::get_message))
        .route("/{message_id}", delete(chat_handlers::delete_message))
}

/// Creates the financial data API router
pub fn create_financial_router() -> Router<AppState> {
    Router::new()
        .route("/", post(financial_handlers::create_entry))
        .route("/user/{user_id}", get(financial_handlers::list_user_entries))
        .route("/summary/{user_id}", get(financial_handlers::get_summary))
        .route("/{entry_id}", get(financial_handlers::get_entry))
        .route("/{entry_id}", put(financial_handlers::update_entry))
        .route("/{entry_id}", delete(financial_handlers::delete_entry))
}

/// Creates the news API router
pub fn create_news_router() -> Router<AppState> {
    Router::new()
        .route("/", post(news_handlers::create_news))
        .route("/", get(news_handlers::list_news))
        // Static segments before the id capture
        .route("/search", get(news_handlers::search_news_get))
        .route("/search", post(news_handlers::search_news_post))
        .route("/category/{category}", get(news_handlers::news_by_category))
        .route("/{news_id}", get(news_handlers::get_news))
        .route("/{news_id}", put(news_handlers::update_news))
        .route("/{news_id}", delete(news_handlers::delete_news))
}

/// Creates the document analysis API router
pub fn create_analysis_router() -> Router<AppState> {
    Router::new()
        .route("/investment", post(analysis_handlers::analyze_investment))
        .route("/forecast", post(analysis_handlers::analyze_forecast))
        .route("/risk", post(analysis_handlers::analyze_risk))
}

/// Assemble every resource router under `/api` with the root handler.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/users", create_users_router())
        .nest("/api/documents", create_documents_router())
        .nest("/api/chat", create_chat_router())
        .nest("/api/financial-data", create_financial_router())
        .nest("/api/news", create_news_router())
        .nest("/api/analysis", create_analysis_router())
        .with_state(state)
}

/// Strip trailing slashes before routing so `/api/users/` reaches `/api/users`.
/// Serve the result with `axum::ServiceExt::into_make_service`.
pub fn with_trailing_slash_normalization(app: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app)
}
