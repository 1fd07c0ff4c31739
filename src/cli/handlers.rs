//! CLI entrypoint wiring: question resolution, client construction, pipeline
//! execution, and best-effort persistence of partial runs.

use super::commands::CliArgs;
use crate::config::{resolve_question, MethodicConfig};
use crate::llm::ModelClient;
use crate::pipeline::{PipelineConfig, ResearchPipeline, StageContext};
use crate::recorder::RunRecorder;
use crate::search::{DuckDuckGoSearch, SearchPolicy};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Exit code for a run aborted by a model or pipeline failure
const EXIT_PIPELINE_FAILURE: i32 = 1;
/// Exit code for configuration problems, including a missing question
const EXIT_CONFIG_ERROR: i32 = 2;

/// Runs the full research pipeline for the given arguments.
///
/// Returns the process exit code. The final record is written whether or not
/// the pipeline completed, so a failed run still persists the stages that
/// finished before the error.
pub async fn handle_run(args: &CliArgs) -> i32 {
    let mut config = MethodicConfig::default();
    if let Some(provider) = args.provider {
        config.provider = provider;
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(max_tokens) = args.max_tokens {
        config.max_tokens = Some(max_tokens);
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return EXIT_CONFIG_ERROR;
    }

    let question = match resolve_question(
        args.question_arg.as_deref(),
        args.question.as_deref(),
        config.env_question.as_deref(),
    ) {
        Ok(question) => question,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    info!(
        "Using {} model '{}'",
        config.provider.name(),
        config.model
    );

    run_pipeline(args, &config, &question, config.create_client()).await
}

/// Runs the pipeline with an already-constructed model client and persists
/// whatever completed, returning the process exit code.
pub async fn run_pipeline(
    args: &CliArgs,
    config: &MethodicConfig,
    question: &str,
    client: Arc<dyn ModelClient>,
) -> i32 {
    let search_policy: SearchPolicy = args.search.into();
    let pipeline_config = PipelineConfig {
        generate_data: !args.no_data,
        search_policy,
        ..PipelineConfig::default()
    };

    let mut pipeline = ResearchPipeline::new(client, pipeline_config);
    if search_policy != SearchPolicy::Off {
        match DuckDuckGoSearch::new() {
            Ok(search) => pipeline = pipeline.with_search(Arc::new(search)),
            Err(e) => {
                if search_policy == SearchPolicy::Required {
                    eprintln!("Failed to initialize web search: {}", e);
                    return EXIT_CONFIG_ERROR;
                }
                warn!("Web search unavailable, continuing without it: {}", e);
            }
        }
    }

    let mut recorder = match RunRecorder::new(&config.output_dir) {
        Ok(recorder) => recorder.with_echo(!args.quiet),
        Err(e) => {
            eprintln!("Failed to prepare run artifacts: {:#}", e);
            return EXIT_PIPELINE_FAILURE;
        }
    };
    info!("Logging run to {}", recorder.log_path().display());

    let mut context = StageContext::new();
    let result = pipeline.execute(question, &mut context, &mut recorder).await;

    // Persist whatever accumulated, even after a mid-run failure.
    if let Err(e) = recorder.write_final_record(question, &context) {
        error!("Failed to write final record: {:#}", e);
    }

    match result {
        Ok(()) => {
            if !args.quiet {
                println!(
                    "\nRun complete. Results saved to {}",
                    recorder.record_path().display()
                );
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if !context.is_empty() {
                eprintln!(
                    "Partial results for {} completed stage(s) saved to {}",
                    context.len(),
                    recorder.record_path().display()
                );
            }
            EXIT_PIPELINE_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockModelClient, MockResponse, ModelError};
    use crate::recorder::RECORD_FILE;
    use clap::Parser;

    fn args_from(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(argv)
    }

    #[tokio::test]
    async fn test_missing_question_exits_with_config_error() {
        // No positional, no flag; METHODIC_QUESTION is not consulted because
        // the config snapshot is taken from a cleared override.
        let mut args = args_from(&["methodic", "--search", "off"]);
        args.question_arg = None;
        args.question = None;

        // Only meaningful when the env var is absent in the test environment.
        if std::env::var("METHODIC_QUESTION").is_err() {
            let code = handle_run(&args).await;
            assert_eq!(code, EXIT_CONFIG_ERROR);
        }
    }

    #[tokio::test]
    async fn test_invalid_timeout_exits_with_config_error() {
        let args = args_from(&["methodic", "some question", "--timeout", "0"]);
        let code = handle_run(&args).await;
        assert_eq!(code, EXIT_CONFIG_ERROR);
    }

    #[tokio::test]
    async fn test_model_failure_exits_with_pipeline_failure() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_from(&["methodic", "--search", "off", "--quiet"]);
        let mut config = MethodicConfig::default();
        config.output_dir = dir.path().to_path_buf();

        // Two stages succeed, then the model gives out.
        let mock = MockModelClient::new();
        mock.add_responses([
            MockResponse::text("observations"),
            MockResponse::text("hypothesis"),
            MockResponse::error(ModelError::Timeout { seconds: 1 }),
        ]);

        let code = run_pipeline(&args, &config, "Why is the sky blue?", Arc::new(mock)).await;
        assert_eq!(code, EXIT_PIPELINE_FAILURE);

        // The stages that finished are still persisted.
        let record = std::fs::read_to_string(dir.path().join(RECORD_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&record).unwrap();
        assert_eq!(value["observations"], "observations");
        assert_eq!(value["hypothesis"], "hypothesis");
        assert!(value.get("predictions").is_none());
    }

    #[tokio::test]
    async fn test_successful_run_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_from(&["methodic", "--search", "off", "--quiet"]);
        let mut config = MethodicConfig::default();
        config.output_dir = dir.path().to_path_buf();

        let mock = MockModelClient::new();
        mock.add_responses((0..6).map(|i| MockResponse::text(format!("stage {}", i))));

        let code = run_pipeline(&args, &config, "Why is the sky blue?", Arc::new(mock)).await;
        assert_eq!(code, 0);
    }
}
