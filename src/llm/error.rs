//! Model backend errors
//!
//! This module defines `ModelError` for language-model backend error handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during model backend operations
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum ModelError {
    /// API request failed with the given message
    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// Authentication failed or credentials are invalid
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Request timed out after the specified duration (in seconds)
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Rate limit exceeded, retry after the specified duration (in seconds)
    #[error("Rate limit exceeded")]
    RateLimit { retry_after: Option<u64> },

    /// Invalid or malformed response from the model
    #[error("Invalid response from model: {message}")]
    InvalidResponse {
        message: String,
        raw_response: Option<String>,
    },

    /// Configuration error (missing API keys, invalid settings, etc.)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Network-related error
    #[error("Network error: {message}")]
    Network { message: String },

    /// Generic error for other cases
    #[error("{message}")]
    Other { message: String },
}
