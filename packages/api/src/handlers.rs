// ABOUTME: Service-level HTTP handlers
// ABOUTME: Root liveness payload with the running version

use axum::Json;
use serde::Serialize;

use finadvisor_core::API_VERSION;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to the Financial Advisor API",
        version: API_VERSION,
        status: "active",
    })
}
