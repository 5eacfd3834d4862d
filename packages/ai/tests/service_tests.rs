// ABOUTME: Integration tests for the chat-completions client
// ABOUTME: A wiremock server stands in for the model provider

use std::time::Duration;

use finadvisor_ai::{AIService, AIServiceError, AnalysisCategory, ChatMessage};
use finadvisor_core::LlmConfig;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, api_key: Option<&str>, timeout: Duration) -> LlmConfig {
    LlmConfig {
        api_key: api_key.map(str::to_string),
        base_url: server.uri(),
        model: "gpt-3.5-turbo".to_string(),
        temperature: 0.2,
        timeout,
    }
}

fn completion(text: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": text }, "finish_reason": "stop" }
        ],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
    })
}

#[tokio::test]
async fn test_complete_sends_bearer_and_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-3.5-turbo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Namaste!")))
        .expect(1)
        .mount(&server)
        .await;

    let service = AIService::new(config_for(&server, Some("sk-test"), Duration::from_secs(5))).unwrap();
    let response = service.complete(&[ChatMessage::user("Hi")]).await.unwrap();

    assert_eq!(response.data, "Namaste!");
    assert_eq!(response.usage.total_tokens, 49);
}

#[tokio::test]
async fn test_chat_reply_orders_system_history_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "What is PPF?" },
                { "role": "assistant", "content": "A savings scheme." },
                { "role": "user", "content": "Lock-in period?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("15 years.")))
        .expect(1)
        .mount(&server)
        .await;

    let service = AIService::new(config_for(&server, Some("sk-test"), Duration::from_secs(5))).unwrap();
    let history = vec![
        ChatMessage::user("What is PPF?"),
        ChatMessage::assistant("A savings scheme."),
    ];

    let reply = service
        .chat_reply("Lock-in period?", &history, Some("retirement"))
        .await
        .unwrap();
    assert_eq!(reply, "15 years.");
}

#[tokio::test]
async fn test_analyze_document_parses_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "1. Summary: Strong quarter.\n2. Key Insights:\n- Revenue up 12%\n3. Recommendations:\n- Hold",
        )))
        .mount(&server)
        .await;

    let service = AIService::new(config_for(&server, Some("sk-test"), Duration::from_secs(5))).unwrap();
    let analysis = service
        .analyze_document(AnalysisCategory::Investment, "quarterly report text")
        .await
        .unwrap();

    assert_eq!(analysis.summary, "Strong quarter.");
    assert_eq!(analysis.insights, vec!["Revenue up 12%".to_string()]);
    assert_eq!(analysis.recommendations, vec!["Hold".to_string()]);
}

#[tokio::test]
async fn test_analyze_document_rejects_unstructured_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Sorry, no idea.")))
        .mount(&server)
        .await;

    let service = AIService::new(config_for(&server, Some("sk-test"), Duration::from_secs(5))).unwrap();
    let result = service
        .analyze_document(AnalysisCategory::Risk, "text")
        .await;

    assert!(matches!(result, Err(AIServiceError::ParseError(_))));
}

#[tokio::test]
async fn test_missing_key_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let service = AIService::new(config_for(&server, None, Duration::from_secs(5))).unwrap();

    assert!(!service.has_api_key());
    assert!(matches!(
        service.complete(&[ChatMessage::user("Hi")]).await,
        Err(AIServiceError::NoApiKey)
    ));
}

#[tokio::test]
async fn test_provider_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let service = AIService::new(config_for(&server, Some("sk-test"), Duration::from_secs(5))).unwrap();
    match service.complete(&[ChatMessage::user("Hi")]).await {
        Err(AIServiceError::ApiError(msg)) => assert!(msg.contains("rate limited")),
        other => panic!("expected ApiError, got {:?}", other.map(|r| r.data)),
    }
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let service = AIService::new(config_for(&server, Some("sk-test"), Duration::from_secs(5))).unwrap();
    assert!(matches!(
        service.complete(&[ChatMessage::user("Hi")]).await,
        Err(AIServiceError::InvalidResponse)
    ));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("too late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let service = AIService::new(config_for(&server, Some("sk-test"), Duration::from_secs(1))).unwrap();
    assert!(matches!(
        service.complete(&[ChatMessage::user("Hi")]).await,
        Err(AIServiceError::Timeout(1))
    ));
}
