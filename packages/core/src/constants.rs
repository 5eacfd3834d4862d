// ABOUTME: Environment variable names and shared constants
// ABOUTME: Centralized definitions used by configuration loading and the API shell

/// Version reported by the liveness endpoint
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// All amounts in the system are stored in this currency
pub const DEFAULT_CURRENCY: &str = "INR";

// Server Configuration
pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";
pub const DEBUG: &str = "DEBUG";

// Persistence
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const UPLOAD_DIR: &str = "UPLOAD_DIR";

// Model provider
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const LLM_TIMEOUT_SECS: &str = "LLM_TIMEOUT_SECS";

// News search provider
pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";
pub const TAVILY_BASE_URL: &str = "TAVILY_BASE_URL";

// Defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://finadvisor.db";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
