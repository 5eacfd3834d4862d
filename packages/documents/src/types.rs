// ABOUTME: Document type definitions
// ABOUTME: Stored documents, upload payloads, updates and structured analysis results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub category: String,
    pub file_type: String,
    pub file_path: Option<String>,
    /// Raw payload kept for extraction; never sent back to clients.
    #[serde(skip_serializing, default)]
    pub content_base64: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub analysis: Option<DocumentAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub summary: String,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// JSON upload body
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentUpload {
    pub title: String,
    pub category: String,
    pub user_id: i64,
    pub file_name: String,
    pub content_base64: String,
}

impl DocumentUpload {
    pub fn is_pdf(&self) -> bool {
        self.file_name.to_lowercase().ends_with(".pdf")
    }
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub user_id: i64,
    pub title: String,
    pub category: String,
    pub file_type: String,
    pub file_path: Option<String>,
    pub content_base64: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentUpdateInput {
    pub title: Option<String>,
    pub category: Option<String>,
    pub analysis: Option<DocumentAnalysis>,
}
