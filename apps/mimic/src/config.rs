use tracing::warn;

use crate::llm_client::DEFAULT_MODEL;
use crate::timeline::DEFAULT_TIMELINE_API_BASE;

const DEFAULT_LLM_API_BASE: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
///
/// Credentials are deliberately not required here: a missing token surfaces as
/// an authentication failure on the first call that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub twitter_bearer_token: String,
    pub openai_api_key: String,
    pub timeline_api_base: String,
    pub llm_api_base: String,
    pub llm_model: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Config {
            twitter_bearer_token: optional_env("TWITTER_BEARER_TOKEN"),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            timeline_api_base: env_or("TIMELINE_API_BASE", DEFAULT_TIMELINE_API_BASE),
            llm_api_base: env_or("LLM_API_BASE", DEFAULT_LLM_API_BASE),
            llm_model: env_or("LLM_MODEL", DEFAULT_MODEL),
            rust_log: env_or("RUST_LOG", "info"),
        }
    }

    /// Logs a warning for every credential that is empty. Call after logging is up.
    pub fn warn_missing_credentials(&self) {
        if self.twitter_bearer_token.is_empty() {
            warn!("TWITTER_BEARER_TOKEN is not set; timeline lookups will be rejected");
        }
        if self.openai_api_key.is_empty() {
            warn!("OPENAI_API_KEY is not set; generation calls will be rejected");
        }
    }
}

fn optional_env(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
