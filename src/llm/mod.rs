//! Model client abstraction layer
//!
//! This module provides a trait-based abstraction for language-model
//! communication, allowing different backends (GenAI, Mock) to be used
//! interchangeably.

mod client;
mod error;
mod genai;
mod mock;
mod types;

pub use client::ModelClient;
pub use error::ModelError;
pub use genai::{GenAiClient, Provider};
pub use mock::{MockModelClient, MockResponse};
pub use types::{CompletionRequest, CompletionResponse};
