/// LLM Client: the single point of entry for all completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion service directly.
/// All LLM interactions MUST go through `LlmClient`, which talks to the service
/// through the `CompletionBackend` trait (faked in tests).
///
/// No retries: a network or rate-limit failure propagates straight to the caller.
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::LlmSettings;

pub mod openai;
pub mod prompts;

use openai::OpenAiBackend;
use prompts::{JSON_SYSTEM, MARKDOWN_SYSTEM, STRUCTURED_TEMPERATURE};

/// How much of a bad reply is echoed back in parse errors.
const EXCERPT_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing {key}. Set it in the environment or .env file.")]
    MissingCredential { key: &'static str },

    #[error("{key} cannot be sent as an Authorization header.")]
    InvalidCredential { key: &'static str },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Model did not return valid JSON ({reason}). Raw: {excerpt}")]
    Parse { reason: String, excerpt: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// One call to the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    /// Ask the provider for a guaranteed JSON object, where supported.
    pub json_object: bool,
}

/// The I/O boundary: sends a request, returns the reply text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Wraps a completion backend with the two reply shapes the pipeline needs.
#[derive(Clone)]
pub struct LlmClient {
    backend: Arc<dyn CompletionBackend>,
    model: String,
    json_mode: bool,
}

impl LlmClient {
    /// Builds the production client. Fails when no credential is configured.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LlmError> {
        let backend = OpenAiBackend::from_settings(settings)?;
        Ok(Self::with_backend(Arc::new(backend), settings.model.clone())
            .json_mode(settings.json_mode))
    }

    pub fn with_backend(backend: Arc<dyn CompletionBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            json_mode: false,
        }
    }

    pub fn json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Calls the model under the strict-JSON framing and deserializes the first
    /// JSON object found in the reply.
    pub async fn complete_structured<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, LlmError> {
        let request = self.request(JSON_SYSTEM, prompt, STRUCTURED_TEMPERATURE, self.json_mode);
        let text = self.backend.complete(&request).await?;
        debug!("Structured completion returned {} chars", text.len());

        let value = extract_json_object(&text)?;
        serde_json::from_value(value).map_err(|e| LlmError::Parse {
            reason: format!("unexpected shape: {e}"),
            excerpt: excerpt(&text),
        })
    }

    /// Calls the model under the Markdown framing and returns the reply verbatim.
    pub async fn complete_markdown(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        let request = self.request(MARKDOWN_SYSTEM, prompt, temperature, false);
        let text = self.backend.complete(&request).await?;
        debug!("Markdown completion returned {} chars", text.len());
        Ok(text)
    }

    fn request(&self, system: &str, prompt: &str, temperature: f32, json_object: bool) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: prompt.to_string(),
                },
            ],
            temperature,
            json_object,
        }
    }
}

/// Best-effort extraction of a single JSON object from a free-text reply.
///
/// 1. The whole reply, with code fences stripped, is tried as a JSON object.
/// 2. Otherwise the text from the first `{` to the last `}` is parsed. This also
///    covers a reply that is valid JSON but not an object, such as `[{...}]`.
///
/// Known limitation: braces in surrounding prose widen the scanned span, so a
/// reply like `Use {x}: {"a": 1}` fails. Several objects in one reply also fail.
/// Both surface as `LlmError::Parse` rather than a silent guess.
pub fn extract_json_object(text: &str) -> Result<Value, LlmError> {
    let parse_error = |reason: &str| LlmError::Parse {
        reason: reason.to_string(),
        excerpt: excerpt(text),
    };

    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(strip_json_fences(text)) {
        return Ok(value);
    }

    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(parse_error("no JSON object found"));
    };
    if end < start {
        return Err(parse_error("no JSON object found"));
    }

    let value = serde_json::from_str::<Value>(&text[start..=end])
        .map_err(|e| parse_error(&format!("malformed JSON object: {e}")))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(parse_error("reply JSON is not an object"))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}
