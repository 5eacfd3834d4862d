// ABOUTME: Integration tests for the document analysis endpoints
// ABOUTME: Check ordering of precondition failures, persistence and upstream failures

mod common;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use common::{completion, data, error_of, setup_test_server_with, TestContext, Upstreams};
use finadvisor_documents::NewDocument;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANALYSIS_REPLY: &str = "\
1. Summary: Balanced portfolio with moderate risk.
2. Key Insights:
- Equity share is 60%
- Debt funds provide stability
3. Recommendations:
- Increase PPF contributions
";

async fn llm_replying(status: u16, text: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(completion(text)))
        .mount(&server)
        .await;
    server
}

async fn setup(llm: &MockServer) -> TestContext {
    setup_test_server_with(Upstreams {
        llm_url: Some(llm.uri()),
        ..Default::default()
    })
    .await
}

#[tokio::test]
async fn test_investment_analysis_is_persisted() {
    let llm = llm_replying(200, ANALYSIS_REPLY).await;
    let ctx = setup(&llm).await;
    let user_id = ctx.create_user("asha").await;
    let document = ctx.upload_pdf(user_id, "portfolio.pdf", &["Equity 60 Debt 40"]).await;

    let response = ctx
        .post_json(
            "/api/analysis/investment",
            &json!({ "document_id": document["id"], "user_id": user_id }),
        )
        .await;
    assert_eq!(response.status(), 200);

    let outcome = data(response).await;
    assert_eq!(outcome["analysis_type"], "investment");
    assert_eq!(
        outcome["analysis"]["summary"],
        "Balanced portfolio with moderate risk."
    );
    assert_eq!(
        outcome["analysis"]["insights"],
        json!(["Equity share is 60%", "Debt funds provide stability"])
    );

    let stored = data(ctx.get(&format!("/api/documents/{}", document["id"])).await).await;
    assert_eq!(stored["analysis"], outcome["analysis"]);
}

#[tokio::test]
async fn test_precondition_failures_in_order() {
    let llm = llm_replying(200, ANALYSIS_REPLY).await;
    let ctx = setup(&llm).await;
    let owner = ctx.create_user("owner").await;
    let other = ctx.create_user("other").await;
    let document = ctx.upload_pdf(owner, "a.pdf", &["text"]).await;
    let doc_id = document["id"].as_i64().unwrap();

    // Missing document wins over a missing user
    let response = ctx
        .post_json("/api/analysis/risk", &json!({ "document_id": 999, "user_id": 999 }))
        .await;
    assert_eq!(response.status(), 404);
    assert_eq!(error_of(response).await.1, "Document not found");

    let response = ctx
        .post_json("/api/analysis/risk", &json!({ "document_id": doc_id, "user_id": 999 }))
        .await;
    assert_eq!(response.status(), 404);
    assert_eq!(error_of(response).await.1, "User not found");

    let response = ctx
        .post_json("/api/analysis/risk", &json!({ "document_id": doc_id, "user_id": other }))
        .await;
    assert_eq!(response.status(), 403);

    let empty = ctx
        .state
        .documents
        .create_document(NewDocument {
            user_id: owner,
            title: "empty".to_string(),
            category: "risk".to_string(),
            file_type: "pdf".to_string(),
            file_path: None,
            content_base64: None,
        })
        .await
        .unwrap();
    let response = ctx
        .post_json("/api/analysis/risk", &json!({ "document_id": empty.id, "user_id": owner }))
        .await;
    assert_eq!(response.status(), 400);

    let broken = ctx
        .state
        .documents
        .create_document(NewDocument {
            user_id: owner,
            title: "broken".to_string(),
            category: "risk".to_string(),
            file_type: "pdf".to_string(),
            file_path: None,
            content_base64: Some(BASE64.encode(b"not a pdf at all")),
        })
        .await
        .unwrap();
    let response = ctx
        .post_json("/api/analysis/risk", &json!({ "document_id": broken.id, "user_id": owner }))
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(error_of(response).await.0, "PDF_ERROR");

    assert!(llm.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_model_failure_is_503_and_nothing_is_stored() {
    let llm = llm_replying(500, "unused").await;
    let ctx = setup(&llm).await;
    let user_id = ctx.create_user("bharat").await;
    let document = ctx.upload_pdf(user_id, "a.pdf", &["forecast text"]).await;

    let response = ctx
        .post_json(
            "/api/analysis/forecast",
            &json!({ "document_id": document["id"], "user_id": user_id }),
        )
        .await;
    assert_eq!(response.status(), 503);
    assert_eq!(error_of(response).await.0, "MODEL_UNAVAILABLE");

    let stored = data(ctx.get(&format!("/api/documents/{}", document["id"])).await).await;
    assert!(stored["analysis"].is_null());
}

#[tokio::test]
async fn test_unstructured_reply_is_503() {
    let llm = llm_replying(200, "I would rather not say.").await;
    let ctx = setup(&llm).await;
    let user_id = ctx.create_user("chitra").await;
    let document = ctx.upload_pdf(user_id, "a.pdf", &["risk text"]).await;

    let response = ctx
        .post_json(
            "/api/analysis/risk",
            &json!({ "document_id": document["id"], "user_id": user_id }),
        )
        .await;
    assert_eq!(response.status(), 503);

    let stored = data(ctx.get(&format!("/api/documents/{}", document["id"])).await).await;
    assert!(stored["analysis"].is_null());
}
