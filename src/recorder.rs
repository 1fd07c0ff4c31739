//! Run persistence: human-readable trace log and structured final record
//!
//! Every run owns two on-disk artifacts. The log file is named with the
//! run-start timestamp and appended to after each completed stage, so a crash
//! mid-run still leaves a useful partial trace. The structured record is a
//! single JSON object written once at run end (success or caught failure)
//! under a fixed name, overwriting any previous run's record.

use crate::pipeline::{StageContext, StageId};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed name of the structured record artifact
pub const RECORD_FILE: &str = "methodic_results.json";

/// Structured snapshot of one run: the question plus every populated stage.
///
/// Stage fields are optional and omitted from the JSON when absent, so a
/// partial run serializes only the stages that completed and a no-data run
/// carries no `experimental_data` key at all. Field order fixes the key
/// order of the serialized object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchRecord {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experimental_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

impl ResearchRecord {
    /// Builds a record from the question and whatever stages completed.
    pub fn from_context(question: &str, context: &StageContext) -> Self {
        let text = |stage| context.get(stage).map(str::to_string);
        Self {
            question: question.to_string(),
            observations: text(StageId::Observations),
            hypothesis: text(StageId::Hypothesis),
            predictions: text(StageId::Predictions),
            experiments: text(StageId::Experiments),
            experimental_data: text(StageId::ExperimentalData),
            analysis: text(StageId::Analysis),
            conclusion: text(StageId::Conclusion),
        }
    }
}

/// Writer for the two per-run artifacts.
pub struct RunRecorder {
    log_path: PathBuf,
    record_path: PathBuf,
    echo: bool,
}

impl RunRecorder {
    /// Creates the output directory and the run log with its header line.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = output_dir.join(format!("methodic_{}.log", timestamp));
        let record_path = output_dir.join(RECORD_FILE);

        fs::write(&log_path, "=== Research Run Log ===\n\n")
            .with_context(|| format!("Failed to create run log: {}", log_path.display()))?;

        Ok(Self {
            log_path,
            record_path,
            echo: false,
        })
    }

    /// Also print each stage block to stdout as it is logged.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    /// Appends one timestamped block for a completed stage.
    pub fn append_log(
        &mut self,
        stage: StageId,
        prompt: &str,
        response: &str,
        timestamp: DateTime<Local>,
    ) -> Result<()> {
        let block = format!(
            "[{}] Stage: {}\n\nPrompt:\n{}\n\nResponse:\n{}\n\n{}\n\n",
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            stage,
            prompt,
            response,
            "-".repeat(80)
        );

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open run log: {}", self.log_path.display()))?;
        file.write_all(block.as_bytes())
            .with_context(|| format!("Failed to append to run log: {}", self.log_path.display()))?;

        if self.echo {
            println!("[{}]\n\n{}\n{}", stage, response, "-".repeat(80));
        }

        Ok(())
    }

    /// Writes the structured record, overwriting any previous one.
    ///
    /// Called once at run end regardless of outcome; a failed run persists
    /// whatever stages completed.
    pub fn write_final_record(&self, question: &str, context: &StageContext) -> Result<PathBuf> {
        let record = ResearchRecord::from_context(question, context);
        let contents = serde_json::to_string_pretty(&record)
            .context("Failed to serialize research record")?;

        fs::write(&self.record_path, contents).with_context(|| {
            format!(
                "Failed to write research record: {}",
                self.record_path.display()
            )
        })?;

        info!("Results saved to {}", self.record_path.display());
        Ok(self.record_path.clone())
    }
}
