//! Configuration management for methodic
//!
//! Settings load from environment variables with sensible defaults; CLI flags
//! override them. Provider API credentials are not handled here: the `genai`
//! library reads the provider-standard variables itself.
//!
//! # Environment Variables
//!
//! - `METHODIC_QUESTION`: fallback research question when no argument or flag
//!   is supplied
//! - `METHODIC_PROVIDER`: provider selection (openai|claude|gemini|ollama|grok|groq) - default: "openai"
//! - `METHODIC_MODEL`: model name - default: provider-specific
//! - `METHODIC_REQUEST_TIMEOUT`: model request timeout in seconds - default: "120"
//! - `METHODIC_MAX_TOKENS`: maximum tokens per model response - default: unlimited
//! - `METHODIC_OUTPUT_DIR`: directory for the run log and results record - default: "."
//! - `METHODIC_LOG_LEVEL`: logging level - default: "info"
//!
//! ## Provider credentials (read by genai)
//! - **OpenAI**: `OPENAI_API_KEY`
//! - **Claude**: `ANTHROPIC_API_KEY`
//! - **Gemini**: `GOOGLE_API_KEY`
//! - **Ollama**: `OLLAMA_HOST` (default: http://localhost:11434)
//! - **Grok**: `XAI_API_KEY`
//! - **Groq**: `GROQ_API_KEY`

use crate::llm::{GenAiClient, ModelClient, Provider};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PROVIDER: Provider = Provider::OpenAI;
const DEFAULT_OPENAI_MODEL: &str = "gpt-5";
const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5:7b";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No research question resolvable from argument, flag, or environment
    #[error(
        "Question is required. Provide it as:\n\
         \x20 - a positional argument: methodic 'Your question?'\n\
         \x20 - a flag: methodic --question 'Your question?'\n\
         \x20 - an environment variable: METHODIC_QUESTION='Your question?'"
    )]
    MissingQuestion,

    /// Invalid provider name
    #[error("Invalid provider: {0}. Valid options: openai, claude, gemini, ollama, grok, groq")]
    InvalidProvider(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration for a methodic run
#[derive(Debug, Clone)]
pub struct MethodicConfig {
    /// Model provider
    pub provider: Provider,

    /// Model name (provider-specific, without prefix)
    pub model: String,

    /// Fallback question from the environment
    pub env_question: Option<String>,

    /// Model request timeout in seconds
    pub request_timeout_secs: u64,

    /// Maximum tokens per model response (None = provider default)
    pub max_tokens: Option<u32>,

    /// Directory for run artifacts
    pub output_dir: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for MethodicConfig {
    /// Loads configuration from `METHODIC_*` environment variables with
    /// defaults for anything missing.
    fn default() -> Self {
        let provider = env::var("METHODIC_PROVIDER")
            .ok()
            .and_then(|s| Provider::parse(&s))
            .unwrap_or(DEFAULT_PROVIDER);

        let model = env::var("METHODIC_MODEL").unwrap_or_else(|_| match provider {
            Provider::Ollama => DEFAULT_OLLAMA_MODEL.to_string(),
            _ => DEFAULT_OPENAI_MODEL.to_string(),
        });

        let env_question = env::var("METHODIC_QUESTION")
            .ok()
            .filter(|q| !q.trim().is_empty());

        let request_timeout_secs = env::var("METHODIC_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_tokens = env::var("METHODIC_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok());

        let output_dir = env::var("METHODIC_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let log_level = env::var("METHODIC_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            provider,
            model,
            env_question,
            request_timeout_secs,
            max_tokens,
            output_dir,
            log_level,
        }
    }
}

impl MethodicConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "model name must not be empty".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_tokens == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "max tokens must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates the model client described by this configuration
    pub fn create_client(&self) -> Arc<dyn ModelClient> {
        Arc::new(GenAiClient::with_config(
            self.provider,
            self.model.clone(),
            Some(Duration::from_secs(self.request_timeout_secs)),
            self.max_tokens,
        ))
    }
}

/// Resolves the research question from the first available source:
/// positional argument, then `--question` flag, then environment variable.
/// Empty or whitespace-only values do not count as supplied.
pub fn resolve_question(
    positional: Option<&str>,
    flag: Option<&str>,
    env_question: Option<&str>,
) -> Result<String, ConfigError> {
    [positional, flag, env_question]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|q| !q.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingQuestion)
}
