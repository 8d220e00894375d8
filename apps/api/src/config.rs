use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::generation::handlers::TEMPERATURE_RANGE;
use crate::llm_client::prompts::DEFAULT_MARKDOWN_TEMPERATURE;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Source of configuration values. Process environment in production,
/// an in-memory map in tests.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Which OpenAI-compatible provider the completion client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Groq,
}

impl LlmProvider {
    fn key_var(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::Groq => "GROQ_API_KEY",
        }
    }

    fn model_var(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_MODEL",
            LlmProvider::Groq => "GROQ_MODEL",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "gpt-4o-mini",
            LlmProvider::Groq => "llama-3.1-8b-instant",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => OPENAI_BASE_URL,
            LlmProvider::Groq => GROQ_BASE_URL,
        }
    }
}

/// Completion service settings. The credential stays optional here; its
/// absence is reported when the client is constructed.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    /// Name of the variable the key is read from, for error messages.
    pub api_key_var: &'static str,
    pub model: String,
    pub base_url: String,
    pub json_mode: bool,
    pub timeout_secs: u64,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm: LlmSettings,
    pub default_temperature: f32,
    pub export_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_source(&EnvSource)
    }

    pub fn from_source(source: &dyn ConfigSource) -> Result<Self> {
        let provider = match optional(source, "LLM_PROVIDER")
            .unwrap_or_else(|| "openai".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "openai" => LlmProvider::OpenAi,
            "groq" => LlmProvider::Groq,
            other => bail!("LLM_PROVIDER must be 'openai' or 'groq', got '{other}'"),
        };

        let llm = LlmSettings {
            provider,
            api_key: optional(source, provider.key_var()),
            api_key_var: provider.key_var(),
            model: optional(source, provider.model_var())
                .unwrap_or_else(|| provider.default_model().to_string()),
            base_url: optional(source, "LLM_BASE_URL")
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            json_mode: parse_or(source, "LLM_JSON_MODE", true)?,
            timeout_secs: parse_or(source, "LLM_TIMEOUT_SECS", 120)?,
        };

        let default_temperature =
            parse_or(source, "DEFAULT_TEMPERATURE", DEFAULT_MARKDOWN_TEMPERATURE)?;
        if !TEMPERATURE_RANGE.contains(&default_temperature) {
            bail!(
                "DEFAULT_TEMPERATURE must lie in {:?}, got {default_temperature}",
                TEMPERATURE_RANGE
            );
        }

        Ok(Config {
            port: parse_or(source, "PORT", 8080)?,
            rust_log: optional(source, "RUST_LOG").unwrap_or_else(|| "info".to_string()),
            llm,
            default_temperature,
            export_dir: optional(source, "EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("exports")),
        })
    }
}

/// Present and non-blank, trimmed.
fn optional(source: &dyn ConfigSource, key: &str) -> Option<String> {
    source
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T>(source: &dyn ConfigSource, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(source, key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
