//! Model communication types
//!
//! This module defines the types used for model request/response communication,
//! independent of any specific provider implementation.

use std::time::Duration;

/// Request to send to the model
///
/// Generation options (max tokens, timeout) belong to the client, not the
/// request: every stage of a run uses the same settings.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The full prompt text
    pub prompt: String,
}

impl CompletionRequest {
    /// Creates a new request with the given prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Response from the model
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content of the response
    pub text: String,
    /// Time taken for the request
    pub response_time: Duration,
}

impl CompletionResponse {
    /// Creates a new response with the given text
    pub fn text(text: impl Into<String>, response_time: Duration) -> Self {
        Self {
            text: text.into(),
            response_time,
        }
    }
}
