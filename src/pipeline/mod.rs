//! Pipeline orchestration core
//!
//! Defines the ordered stage sequence, the accumulating stage context, and
//! the driver that executes stages against a model client.

pub mod context;
pub mod orchestrator;
pub mod stages;

pub use context::{DuplicateStageError, StageContext, StageId, StageResult};
pub use orchestrator::{PipelineConfig, PipelineError, ResearchPipeline};
pub use stages::{StageSpec, STAGES};
