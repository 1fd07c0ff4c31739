use super::context::{DuplicateStageError, StageContext, StageId, StageResult};
use super::stages::STAGES;
use crate::llm::{CompletionRequest, ModelClient, ModelError};
use crate::recorder::RunRecorder;
use crate::search::{format_hits, SearchError, SearchPolicy, SearchProvider};
use chrono::Local;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Runtime options for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Run the simulated experimental-data stage
    pub generate_data: bool,
    /// Web-search behavior for the observe stage
    pub search_policy: SearchPolicy,
    /// Maximum search hits folded into the observe prompt
    pub max_search_results: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            generate_data: true,
            search_policy: SearchPolicy::default(),
            max_search_results: 5,
        }
    }
}

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The model call for a stage failed; the run stops at this stage
    #[error("stage '{stage}' failed: {source}")]
    Stage {
        stage: StageId,
        #[source]
        source: ModelError,
    },

    /// Search failed and the policy requires it
    #[error("web search failed: {source}")]
    Search {
        #[source]
        source: SearchError,
    },

    /// A stage output would have been written twice (pipeline definition bug)
    #[error(transparent)]
    DuplicateStage(#[from] DuplicateStageError),

    /// Writing the run log failed
    #[error("failed to record stage output: {0}")]
    Recorder(#[from] anyhow::Error),
}

impl PipelineError {
    /// The stage at which the run stopped, where one is attributable.
    pub fn stage(&self) -> Option<StageId> {
        match self {
            PipelineError::Stage { stage, .. } => Some(*stage),
            PipelineError::Search { .. } => Some(StageId::Observations),
            PipelineError::DuplicateStage(err) => Some(err.stage),
            PipelineError::Recorder(_) => None,
        }
    }
}

/// Sequential research pipeline driver.
///
/// Executes the fixed stage table in order, one blocking model call per
/// stage, appending to the run log after each stage so a failed run still
/// leaves a useful partial trace. The context is mutated in place; on error
/// the caller keeps whatever accumulated before the failing stage.
pub struct ResearchPipeline {
    model: Arc<dyn ModelClient>,
    search: Option<Arc<dyn SearchProvider>>,
    config: PipelineConfig,
}

impl ResearchPipeline {
    pub fn new(model: Arc<dyn ModelClient>, config: PipelineConfig) -> Self {
        Self {
            model,
            search: None,
            config,
        }
    }

    /// Attaches the search collaborator used by the observe stage.
    pub fn with_search(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }

    /// Runs every stage in order, threading each output into the context.
    pub async fn execute(
        &self,
        question: &str,
        context: &mut StageContext,
        recorder: &mut RunRecorder,
    ) -> Result<(), PipelineError> {
        let start = Instant::now();
        info!("Starting research pipeline: {}", question);

        context.set(StageId::Question, question)?;

        for stage in &STAGES {
            if stage.id == StageId::ExperimentalData && !self.config.generate_data {
                debug!("Skipping stage '{}': data generation disabled", stage.id);
                continue;
            }

            info!("Stage: {}", stage.label);
            let stage_start = Instant::now();

            let mut prompt = (stage.build_prompt)(context);
            if stage.id == StageId::Observations {
                if let Some(snippets) = self.observation_snippets(question).await? {
                    prompt.push_str(&format!(
                        "\n\nWeb search results:\n{}\nFold these retrieved snippets into your observations where relevant.",
                        snippets
                    ));
                }
            }

            let response = self
                .model
                .complete(CompletionRequest::new(prompt.clone()))
                .await
                .map_err(|source| PipelineError::Stage {
                    stage: stage.id,
                    source,
                })?;

            recorder.append_log(stage.id, &prompt, &response.text, Local::now())?;

            context.record(StageResult {
                id: stage.id,
                text: response.text,
            })?;

            debug!(
                "Stage '{}' complete in {:.2}s",
                stage.id,
                stage_start.elapsed().as_secs_f64()
            );
        }

        info!(
            "Pipeline complete: {} stage output(s) in {:.2}s",
            context.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(())
    }

    /// Retrieves search snippets for the observe stage, honoring the policy.
    async fn observation_snippets(
        &self,
        question: &str,
    ) -> Result<Option<String>, PipelineError> {
        if self.config.search_policy == SearchPolicy::Off {
            return Ok(None);
        }

        let Some(provider) = &self.search else {
            return Ok(None);
        };

        match provider
            .search(question, self.config.max_search_results)
            .await
        {
            Ok(hits) if hits.is_empty() => {
                debug!("{} returned no results", provider.name());
                Ok(None)
            }
            Ok(hits) => Ok(Some(format_hits(&hits))),
            Err(source) => {
                if self.config.search_policy == SearchPolicy::Required {
                    Err(PipelineError::Search { source })
                } else {
                    warn!(
                        "{} search failed, continuing without snippets: {}",
                        provider.name(),
                        source
                    );
                    Ok(None)
                }
            }
        }
    }
}
