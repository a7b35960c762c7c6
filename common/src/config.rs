//! Application configuration.
//!
//! Configuration is read from the environment with sensible defaults so the
//! service starts without any setup in development. The language model
//! credential lives here and is handed to the chat client at construction
//! time; no component reads it from a global.

use std::time::Duration;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address host.
    pub host: String,

    /// Bind address port.
    pub port: u16,

    /// The single origin allowed by the CORS layer.
    pub allowed_origin: String,

    /// Timeout for acquiring a database connection, in seconds.
    pub connect_timeout_secs: u64,

    /// Language model service configuration.
    pub llm: LlmConfig,
}

/// Configuration for the external language model service.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key sent as a bearer token.
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,

    /// Model identifier used for both chat calls.
    pub model: String,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4";

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// Recognized variables: `SERVER_HOST`, `SERVER_PORT`,
    /// `CORS_ALLOWED_ORIGIN`, `DB_CONNECT_TIMEOUT_SECS`, `OPENAI_API_KEY`,
    /// `OPENAI_BASE_URL`, `OPENAI_MODEL`.
    pub fn load(default_port: u16) -> Self {
        let llm = LlmConfig {
            api_key: env_or("OPENAI_API_KEY", ""),
            base_url: env_or("OPENAI_BASE_URL", DEFAULT_LLM_BASE_URL),
            model: env_or("OPENAI_MODEL", DEFAULT_LLM_MODEL),
        };

        if llm.api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY is not set; language model calls will fail");
        }

        Self {
            host: env_or("SERVER_HOST", DEFAULT_HOST),
            port: env_parse_or("SERVER_PORT", default_port),
            allowed_origin: env_or("CORS_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN),
            connect_timeout_secs: env_parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
            llm,
        }
    }

    /// Database connection acquire timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
