//! GenAI multi-provider model client
//!
//! This module provides a unified interface to multiple LLM providers using the
//! `genai` crate. It supports OpenAI, Anthropic Claude, Google Gemini, Ollama,
//! xAI Grok and Groq through a consistent API.
//!
//! API credentials are read by `genai` itself from the provider-standard
//! environment variables (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, and so on).

use super::client::ModelClient;
use super::error::ModelError;
use super::types::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use clap::ValueEnum;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use genai::Client;
use std::time::Duration;
use tracing::{debug, error, info};

/// Supported model providers
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI GPT models
    OpenAI,
    /// Anthropic Claude
    Claude,
    /// Google Gemini
    Gemini,
    /// Ollama local inference
    Ollama,
    /// xAI Grok
    Grok,
    /// Groq
    Groq,
}

impl Provider {
    /// Returns the provider prefix for genai model strings
    fn prefix(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
            Provider::Ollama => "ollama",
            Provider::Grok => "grok",
            Provider::Groq => "groq",
        }
    }

    /// Returns the provider name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Claude => "Claude",
            Provider::Gemini => "Gemini",
            Provider::Ollama => "Ollama",
            Provider::Grok => "Grok",
            Provider::Groq => "Groq",
        }
    }

    /// Parses a provider from its lowercase identifier
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Provider::OpenAI),
            "claude" => Some(Provider::Claude),
            "gemini" => Some(Provider::Gemini),
            "ollama" => Some(Provider::Ollama),
            "grok" => Some(Provider::Grok),
            "groq" => Some(Provider::Groq),
            _ => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// GenAI-based model client supporting multiple providers
///
/// This client is thread-safe and can be shared across threads using `Arc`.
pub struct GenAiClient {
    /// GenAI client instance
    client: Client,

    /// Full model identifier (e.g., "openai:gpt-5")
    model: String,

    /// Provider type
    provider: Provider,

    /// Request timeout
    timeout: Duration,

    /// Maximum tokens for response
    max_tokens: Option<u32>,
}

impl GenAiClient {
    /// Creates a new GenAI client with default settings
    pub fn new(provider: Provider, model: String) -> Self {
        Self::with_config(provider, model, None, None)
    }

    /// Creates a new GenAI client with custom configuration
    ///
    /// # Arguments
    ///
    /// * `provider` - Model provider to use
    /// * `model` - Model name (without provider prefix)
    /// * `timeout` - Optional request timeout
    /// * `max_tokens` - Optional maximum tokens for response
    pub fn with_config(
        provider: Provider,
        model: String,
        timeout: Option<Duration>,
        max_tokens: Option<u32>,
    ) -> Self {
        let client = Client::default();
        let full_model = format!("{}:{}", provider.prefix(), model);

        debug!(
            "Creating GenAI client: provider={}, model={}",
            provider.name(),
            model,
        );

        Self {
            client,
            model: full_model,
            provider,
            timeout: timeout.unwrap_or(Duration::from_secs(60)),
            max_tokens,
        }
    }
}

#[async_trait]
impl ModelClient for GenAiClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ModelError> {
        let chat_req = ChatRequest::new(vec![ChatMessage::user(request.prompt.clone())]);

        let mut options = ChatOptions::default();
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }

        debug!(
            "Sending request to {}: prompt_length={}",
            self.provider.name(),
            request.prompt.len()
        );

        let start = std::time::Instant::now();

        let response = tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, chat_req, Some(&options)),
        )
        .await
        .map_err(|_| ModelError::Timeout {
            seconds: self.timeout.as_secs(),
        })?
        .map_err(|e| {
            error!("{} API error: {}", self.provider.name(), e);
            ModelError::Api {
                message: format!("{} request failed: {}", self.provider.name(), e),
                status_code: None,
            }
        })?;

        let elapsed = start.elapsed();

        info!(
            "{} generation completed in {:.2}s",
            self.provider.name(),
            elapsed.as_secs_f64()
        );

        let text = response
            .first_text()
            .ok_or_else(|| {
                error!("No text content in {} response", self.provider.name());
                ModelError::InvalidResponse {
                    message: "No text content in response".to_string(),
                    raw_response: None,
                }
            })?
            .to_string();

        debug!(
            "{} response length: {} characters",
            self.provider.name(),
            text.len()
        );

        Ok(CompletionResponse::text(text, elapsed))
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for GenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
