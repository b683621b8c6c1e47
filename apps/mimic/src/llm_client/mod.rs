/// LLM Client — the single point of entry for all text-generation calls in mimic.
///
/// ARCHITECTURAL RULE: No other module may call the generation API directly.
/// Components receive a `&dyn TextGenerator` plus a `SamplingProfile` and never
/// hold model state of their own.
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Model used for both sampling profiles unless `LLM_MODEL` overrides it.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const EXACT_TEMPERATURE: f32 = 0.0;
const CREATIVE_TEMPERATURE: f32 = 1.0;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A named (model, temperature) pair. Built once from config, passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingProfile {
    pub name: &'static str,
    pub model: String,
    pub temperature: f32,
}

/// The two sampling configurations the pipeline uses.
///
/// `exact` drives tone analysis (stable characterization); `creative` drives
/// subject and post generation (repeated calls are expected to diverge).
#[derive(Debug, Clone)]
pub struct GenerationProfiles {
    pub exact: SamplingProfile,
    pub creative: SamplingProfile,
}

impl GenerationProfiles {
    pub fn for_model(model: &str) -> Self {
        Self {
            exact: SamplingProfile {
                name: "exact",
                model: model.to_string(),
                temperature: EXACT_TEMPERATURE,
            },
            creative: SamplingProfile {
                name: "creative",
                model: model.to_string(),
                temperature: CREATIVE_TEMPERATURE,
            },
        }
    }
}

/// The generation seam. `LlmClient` talks to the real API; tests swap in stubs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, profile: &SamplingProfile) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the text content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client. One request per call: no retries, no streaming.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_base: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
        }
    }

    /// Makes a single call to the chat-completions API, returning the full response.
    pub async fn call(
        &self,
        prompt: &str,
        profile: &SamplingProfile,
    ) -> Result<ChatResponse, LlmError> {
        let response = self.request(prompt, profile).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let chat_response = decode_response(status, &body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded ({}): prompt_tokens={}, completion_tokens={}",
                profile.name, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }

    fn request(&self, prompt: &str, profile: &SamplingProfile) -> RequestBuilder {
        let request_body = ChatRequest {
            model: &profile.model,
            temperature: profile.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        self.client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
    }
}

/// Non-2xx becomes `Api` with the extracted message; a 2xx body that is not
/// a chat response is a `Parse` error.
fn decode_response(status: StatusCode, body: &str) -> Result<ChatResponse, LlmError> {
    if !status.is_success() {
        return Err(LlmError::Api {
            status: status.as_u16(),
            message: api_error_message(body.to_string()),
        });
    }
    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, profile: &SamplingProfile) -> Result<String, LlmError> {
        let response = self.call(prompt, profile).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
