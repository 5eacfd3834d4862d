// ABOUTME: Common test utilities for API integration tests
// ABOUTME: Provides test server setup, fixture helpers, and HTTP client utilities

#![allow(dead_code)]

use std::time::Duration;

use axum::{extract::Request, ServiceExt};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use finadvisor_api::{create_app, with_trailing_slash_normalization, AppState};
use finadvisor_core::{AppConfig, LlmConfig, NewsSearchConfig};
use finadvisor_storage::open_in_memory;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test context containing server URL, shared state and the upload directory
pub struct TestContext {
    pub base_url: String,
    pub client: Client,
    pub state: AppState,
    pub pool: SqlitePool,
    pub upload_dir: TempDir,
}

/// Upstream endpoints for the model and news-search providers. A provider
/// without a URL is left unconfigured.
#[derive(Default)]
pub struct Upstreams {
    pub llm_url: Option<String>,
    pub news_url: Option<String>,
}

pub async fn setup_test_server() -> TestContext {
    setup_test_server_with(Upstreams::default()).await
}

/// Create a test server with an isolated in-memory database
pub async fn setup_test_server_with(upstreams: Upstreams) -> TestContext {
    let upload_dir = TempDir::new().unwrap();

    let config = AppConfig {
        upload_dir: upload_dir.path().to_path_buf(),
        llm: LlmConfig {
            api_key: upstreams.llm_url.as_ref().map(|_| "sk-test".to_string()),
            base_url: upstreams
                .llm_url
                .unwrap_or_else(|| "http://127.0.0.1:9".to_string()),
            timeout: Duration::from_secs(2),
            ..LlmConfig::default()
        },
        news: NewsSearchConfig {
            api_key: upstreams.news_url.as_ref().map(|_| "tvly-test".to_string()),
            base_url: upstreams
                .news_url
                .unwrap_or_else(|| "http://127.0.0.1:9".to_string()),
        },
        ..AppConfig::default()
    };

    let pool = open_in_memory().await.expect("Failed to open test database");
    let state = AppState::new(config, pool.clone()).expect("Failed to build state");
    let app = with_trailing_slash_normalization(create_app(state.clone()));

    // Bind to random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .await
            .unwrap();
    });

    TestContext {
        base_url: format!("http://{}", addr),
        client: Client::new(),
        state,
        pool,
        upload_dir,
    }
}

impl TestContext {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client.post(self.url(path)).json(body).send().await.unwrap()
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Response {
        self.client.put(self.url(path)).json(body).send().await.unwrap()
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client.delete(self.url(path)).send().await.unwrap()
    }

    /// Register a user and return its id
    pub async fn create_user(&self, username: &str) -> i64 {
        let response = self
            .post_json(
                "/api/users/",
                &json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "s3cret-pass",
                    "full_name": "Test User",
                }),
            )
            .await;
        assert_eq!(response.status(), 201);
        data(response).await["id"].as_i64().unwrap()
    }

    /// Upload a PDF built from `pages` and return the created document JSON
    pub async fn upload_pdf(&self, user_id: i64, file_name: &str, pages: &[&str]) -> Value {
        let response = self
            .post_json(
                "/api/documents/",
                &json!({
                    "title": "Quarterly statement",
                    "category": "investment",
                    "user_id": user_id,
                    "file_name": file_name,
                    "content_base64": BASE64.encode(build_pdf(pages)),
                }),
            )
            .await;
        assert_eq!(response.status(), 201);
        data(response).await
    }
}

/// Unwrap the `data` field of a success envelope
pub async fn data(response: Response) -> Value {
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true, "unexpected body: {}", body);
    body["data"].clone()
}

/// Return `(code, message)` of an error envelope
pub async fn error_of(response: Response) -> (String, String) {
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false, "unexpected body: {}", body);
    assert!(body["request_id"].is_string());
    (
        body["error"]["code"].as_str().unwrap().to_string(),
        body["error"]["message"].as_str().unwrap().to_string(),
    )
}

/// Chat-completions reply in the provider's wire shape
pub fn completion(text: &str) -> Value {
    json!({
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": text }, "finish_reason": "stop" }
        ],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    })
}

/// A minimal PDF with one text line per page
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
