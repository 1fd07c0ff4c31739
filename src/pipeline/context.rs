//! Accumulating stage context for a single pipeline run
//!
//! The context is an ordered, append-only mapping from stage identifier to the
//! text that stage produced. It is owned by exactly one run and passed by
//! mutable reference through the pipeline; entries are never overwritten.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of one pipeline stage output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Question,
    Observations,
    Hypothesis,
    Predictions,
    Experiments,
    ExperimentalData,
    Analysis,
    Conclusion,
}

impl StageId {
    /// Returns the serialized key for this stage
    pub fn as_str(&self) -> &'static str {
        match self {
            StageId::Question => "question",
            StageId::Observations => "observations",
            StageId::Hypothesis => "hypothesis",
            StageId::Predictions => "predictions",
            StageId::Experiments => "experiments",
            StageId::ExperimentalData => "experimental_data",
            StageId::Analysis => "analysis",
            StageId::Conclusion => "conclusion",
        }
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stage output would be written twice.
///
/// This is a programming invariant violation in the pipeline definition, not
/// a runtime condition a user can cause.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("stage '{stage}' already has a recorded output")]
pub struct DuplicateStageError {
    pub stage: StageId,
}

/// Output of a single stage execution, immediately folded into the context
#[derive(Debug, Clone)]
pub struct StageResult {
    pub id: StageId,
    pub text: String,
}

/// Ordered record of all stage outputs for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct StageContext {
    entries: Vec<(StageId, String)>,
}

impl StageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a stage output. Fails if the stage already has one.
    pub fn set(
        &mut self,
        stage: StageId,
        text: impl Into<String>,
    ) -> Result<(), DuplicateStageError> {
        if self.contains(stage) {
            return Err(DuplicateStageError { stage });
        }
        self.entries.push((stage, text.into()));
        Ok(())
    }

    /// Folds a stage result into the context.
    pub fn record(&mut self, result: StageResult) -> Result<(), DuplicateStageError> {
        self.set(result.id, result.text)
    }

    /// Returns the text produced by a stage, if it has run.
    pub fn get(&self, stage: StageId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| *id == stage)
            .map(|(_, text)| text.as_str())
    }

    /// Returns the stage text, or a placeholder for stages that have not run.
    pub fn text_or_pending(&self, stage: StageId) -> &str {
        self.get(stage).unwrap_or("not yet produced")
    }

    pub fn contains(&self, stage: StageId) -> bool {
        self.entries.iter().any(|(id, _)| *id == stage)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in the order stages completed.
    pub fn iter(&self) -> impl Iterator<Item = (StageId, &str)> {
        self.entries.iter().map(|(id, text)| (*id, text.as_str()))
    }
}
