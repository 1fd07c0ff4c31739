//! methodic - LLM-driven automation of the scientific method
//!
//! This library runs a research question through the ordered stages of the
//! scientific method, issuing one model call per stage and threading each
//! stage's output into the next stage's prompt. Every run persists a
//! human-readable trace log and a structured JSON record.
//!
//! # Core Concepts
//!
//! - **Model clients**: pluggable LLM backends behind the [`llm::ModelClient`]
//!   trait (multi-provider via `genai`, plus a scripted mock for tests)
//! - **Stage context**: the append-only, ordered record of every stage's
//!   output for one run
//! - **Stage table**: the fixed stage sequence with a pure prompt builder per
//!   stage
//! - **Recorder**: the per-run log file and the fixed-name results record
//!
//! # Example Usage
//!
//! ```ignore
//! use methodic::llm::{GenAiClient, Provider};
//! use methodic::pipeline::{PipelineConfig, ResearchPipeline, StageContext};
//! use methodic::recorder::RunRecorder;
//! use std::sync::Arc;
//!
//! async fn investigate() -> anyhow::Result<()> {
//!     let client = Arc::new(GenAiClient::new(Provider::OpenAI, "gpt-5".to_string()));
//!     let pipeline = ResearchPipeline::new(client, PipelineConfig::default());
//!
//!     let mut context = StageContext::new();
//!     let mut recorder = RunRecorder::new(".")?;
//!     pipeline
//!         .execute("Why is the sky blue?", &mut context, &mut recorder)
//!         .await?;
//!
//!     recorder.write_final_record("Why is the sky blue?", &context)?;
//!     Ok(())
//! }
//! ```
//!
//! # Simulated data
//!
//! The optional experimental-data stage produces model-generated *simulated*
//! results; it is labeled as such in prompts and output and can be disabled
//! entirely with the `--no-data` switch.

// Public modules
pub mod cli;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod recorder;
pub mod search;

// Re-export key types for convenient access
pub use config::{resolve_question, ConfigError, MethodicConfig};
pub use llm::{GenAiClient, MockModelClient, ModelClient, ModelError, Provider};
pub use pipeline::{
    DuplicateStageError, PipelineConfig, PipelineError, ResearchPipeline, StageContext, StageId,
};
pub use recorder::{ResearchRecord, RunRecorder};
pub use search::{SearchPolicy, SearchProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
