// ABOUTME: Core configuration and constants for the Financial Advisor API
// ABOUTME: Foundational package shared by every other crate in the workspace

pub mod config;
pub mod constants;

// Re-export configuration types
pub use config::{AppConfig, ConfigError, LlmConfig, NewsSearchConfig};

// Re-export constants
pub use constants::{API_VERSION, DEFAULT_CURRENCY};
