// ABOUTME: AI service for chat-completion calls to an OpenAI-compatible provider
// ABOUTME: Handles API requests, timeouts, response parsing and usage reporting

use std::time::Duration;

use finadvisor_core::LlmConfig;
use finadvisor_documents::DocumentAnalysis;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::analysis::parse_analysis;
use crate::prompts::{analysis_prompt, chat_system_prompt, AnalysisCategory};

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Model request timed out after {0} seconds")]
    Timeout(u64),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid response format")]
    InvalidResponse,
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug)]
pub struct AIResponse<T> {
    pub data: T,
    pub usage: Usage,
}

/// AI service for chat-completion calls
pub struct AIService {
    client: Client,
    config: LlmConfig,
}

impl AIService {
    /// Create HTTP client with timeout configuration
    fn create_client(timeout: Duration) -> AIServiceResult<Client> {
        Ok(Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?)
    }

    pub fn new(config: LlmConfig) -> AIServiceResult<Self> {
        if config.api_key.is_none() {
            info!("No model API key configured - AI calls will fail with NoApiKey");
        }

        Ok(Self {
            client: Self::create_client(config.timeout)?,
            config,
        })
    }

    /// Get the model being used by this service
    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Send a conversation and return the first choice's text
    pub async fn complete(&self, messages: &[ChatMessage]) -> AIServiceResult<AIResponse<String>> {
        let api_key = self.config.api_key.as_ref().ok_or(AIServiceError::NoApiKey)?;
        let timeout_secs = self.config.timeout.as_secs();

        let request = CompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages,
        };

        info!(
            "Making chat completion request: model={}, messages={}, timeout={}s",
            request.model,
            messages.len(),
            timeout_secs
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Chat completion request timed out after {} seconds", timeout_secs);
                    AIServiceError::Timeout(timeout_secs)
                } else if e.is_connect() {
                    error!("Failed to connect to model provider: {}", e);
                    AIServiceError::ApiError(format!("Connection failed: {}", e))
                } else {
                    error!("Chat completion request failed: {}", e);
                    AIServiceError::RequestFailed(e)
                }
            })?;

        info!("Received response from model provider: status={}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Model provider error: {} - {}", status, error_text);
            return Err(AIServiceError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AIServiceError::Timeout(timeout_secs)
            } else {
                AIServiceError::ParseError(e.to_string())
            }
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AIServiceError::InvalidResponse)?;

        Ok(AIResponse {
            data: text,
            usage: completion.usage.unwrap_or_default(),
        })
    }

    /// Run a category-specific analysis over extracted document text
    pub async fn analyze_document(
        &self,
        category: AnalysisCategory,
        document_text: &str,
    ) -> AIServiceResult<DocumentAnalysis> {
        let prompt = analysis_prompt(category, document_text);
        let response = self.complete(&[ChatMessage::user(prompt)]).await?;

        info!(
            "Analysis ({}) used {} tokens",
            category.as_str(),
            response.usage.total_tokens
        );

        let analysis = parse_analysis(&response.data);
        if analysis.summary.is_empty()
            && analysis.insights.is_empty()
            && analysis.recommendations.is_empty()
        {
            error!("Model reply did not follow the analysis format");
            return Err(AIServiceError::ParseError(
                "Model reply did not contain a summary, insights or recommendations".to_string(),
            ));
        }

        Ok(analysis)
    }

    /// Produce an advisor reply. `history` is chronological and excludes `message`.
    pub async fn chat_reply(
        &self,
        message: &str,
        history: &[ChatMessage],
        related_to: Option<&str>,
    ) -> AIServiceResult<String> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(chat_system_prompt(related_to)));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(message));

        Ok(self.complete(&messages).await?.data)
    }
}
