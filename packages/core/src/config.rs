// ABOUTME: Process configuration built once at startup
// ABOUTME: Parses environment values into typed config passed to every component

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[source] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid boolean for {name}: {value}")]
    InvalidBool { name: &'static str, value: String },
    #[error("Invalid timeout for {name}: {value}")]
    InvalidTimeout { name: &'static str, value: String },
}

/// Settings for the chat-completion model provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            temperature: DEFAULT_LLM_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

/// Settings for the external news-search provider
#[derive(Debug, Clone)]
pub struct NewsSearchConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for NewsSearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_TAVILY_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub llm: LlmConfig,
    pub news: NewsSearchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            llm: LlmConfig::default(),
            news: NewsSearchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get(PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let debug = match get(DEBUG) {
            Some(raw) => parse_bool(DEBUG, &raw)?,
            None => false,
        };

        let timeout_secs = match get(LLM_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    name: LLM_TIMEOUT_SECS,
                    value: raw,
                })?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        let llm = LlmConfig {
            api_key: get(OPENAI_API_KEY),
            base_url: get(OPENAI_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: get(OPENAI_MODEL).unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            temperature: DEFAULT_LLM_TEMPERATURE,
            timeout: Duration::from_secs(timeout_secs),
        };

        if llm.api_key.is_none() {
            info!("{} not set - chat replies will fall back to apologies", OPENAI_API_KEY);
        }

        let news = NewsSearchConfig {
            api_key: get(TAVILY_API_KEY),
            base_url: get(TAVILY_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TAVILY_BASE_URL.to_string()),
        };

        Ok(AppConfig {
            host: get(HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            debug,
            database_url: get(DATABASE_URL).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            upload_dir: get(UPLOAD_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            llm,
            news,
        })
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: raw.to_string(),
        }),
    }
}
