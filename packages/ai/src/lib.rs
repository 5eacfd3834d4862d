// ABOUTME: Language-model integration for the Financial Advisor API
// ABOUTME: Chat-completions client, analysis and chat prompts, and the analysis response parser

pub mod analysis;
pub mod prompts;
pub mod service;

// Re-export service types
pub use service::{AIResponse, AIService, AIServiceError, AIServiceResult, ChatMessage, Role, Usage};

// Re-export prompt and analysis helpers
pub use analysis::parse_analysis;
pub use prompts::{AnalysisCategory, MAX_DOCUMENT_CHARS};
