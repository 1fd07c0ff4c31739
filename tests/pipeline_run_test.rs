//! End-to-end pipeline tests against a scripted model client.
//!
//! Each stage's mock output is a fixed fingerprint token, so assertions can
//! check that every stage's prompt literally contains the text of the stages
//! it depends on.

use methodic::llm::{MockModelClient, MockResponse, ModelError};
use methodic::pipeline::{PipelineConfig, ResearchPipeline, StageContext, StageId};
use methodic::recorder::RunRecorder;
use std::sync::Arc;

const QUESTION: &str = "Why is the sky blue?";

fn fingerprinted_client(outputs: &[&str]) -> Arc<MockModelClient> {
    let client = MockModelClient::new();
    client.add_responses(outputs.iter().map(|o| MockResponse::text(*o)));
    Arc::new(client)
}

#[tokio::test]
async fn full_run_threads_each_stage_into_the_next() {
    let tmp = tempfile::tempdir().unwrap();
    let client = fingerprinted_client(&[
        "OBSERVATIONS_OUTPUT",
        "HYPOTHESIS_OUTPUT",
        "PREDICTIONS_OUTPUT",
        "EXPERIMENTS_OUTPUT",
        "DATA_OUTPUT",
        "ANALYSIS_OUTPUT",
        "CONCLUSION_OUTPUT",
    ]);
    let pipeline = ResearchPipeline::new(client.clone(), PipelineConfig::default());

    let mut context = StageContext::new();
    let mut recorder = RunRecorder::new(tmp.path()).unwrap();
    pipeline
        .execute(QUESTION, &mut context, &mut recorder)
        .await
        .unwrap();

    // Question plus all seven stage outputs, in dependency order.
    let keys: Vec<StageId> = context.iter().map(|(id, _)| id).collect();
    assert_eq!(
        keys,
        vec![
            StageId::Question,
            StageId::Observations,
            StageId::Hypothesis,
            StageId::Predictions,
            StageId::Experiments,
            StageId::ExperimentalData,
            StageId::Analysis,
            StageId::Conclusion,
        ]
    );

    let prompts = client.captured_prompts();
    assert_eq!(prompts.len(), 7);

    // observe <- question
    assert!(prompts[0].contains(QUESTION));
    // hypothesize <- question + observations
    assert!(prompts[1].contains(QUESTION));
    assert!(prompts[1].contains("OBSERVATIONS_OUTPUT"));
    // predict <- hypothesis
    assert!(prompts[2].contains("HYPOTHESIS_OUTPUT"));
    // experiment <- hypothesis + predictions
    assert!(prompts[3].contains("HYPOTHESIS_OUTPUT"));
    assert!(prompts[3].contains("PREDICTIONS_OUTPUT"));
    // data generation <- experiments
    assert!(prompts[4].contains("EXPERIMENTS_OUTPUT"));
    // analyze <- experiments + experimental data
    assert!(prompts[5].contains("EXPERIMENTS_OUTPUT"));
    assert!(prompts[5].contains("DATA_OUTPUT"));
    assert!(!prompts[5].contains("No experimental data available"));
    // conclude <- hypothesis + predictions + analysis
    assert!(prompts[6].contains("HYPOTHESIS_OUTPUT"));
    assert!(prompts[6].contains("PREDICTIONS_OUTPUT"));
    assert!(prompts[6].contains("ANALYSIS_OUTPUT"));
}

#[tokio::test]
async fn no_data_run_has_six_keys_and_theoretical_analysis_marker() {
    let tmp = tempfile::tempdir().unwrap();
    let client = fingerprinted_client(&[
        "OBSERVATIONS_OUTPUT",
        "HYPOTHESIS_OUTPUT",
        "PREDICTIONS_OUTPUT",
        "EXPERIMENTS_OUTPUT",
        "ANALYSIS_OUTPUT",
        "CONCLUSION_OUTPUT",
    ]);
    let config = PipelineConfig {
        generate_data: false,
        ..PipelineConfig::default()
    };
    let pipeline = ResearchPipeline::new(client.clone(), config);

    let mut context = StageContext::new();
    let mut recorder = RunRecorder::new(tmp.path()).unwrap();
    pipeline
        .execute(QUESTION, &mut context, &mut recorder)
        .await
        .unwrap();

    assert_eq!(context.len(), 6);
    assert!(!context.contains(StageId::ExperimentalData));

    let prompts = client.captured_prompts();
    assert_eq!(prompts.len(), 6);

    // The analyze prompt carries the explicit no-data marker, not fabricated data.
    assert!(prompts[4].contains("No experimental data available"));
}

#[tokio::test]
async fn failure_at_stage_k_keeps_only_earlier_stages() {
    let tmp = tempfile::tempdir().unwrap();
    let client = MockModelClient::new();
    client.add_responses(vec![
        MockResponse::text("OBSERVATIONS_OUTPUT"),
        MockResponse::text("HYPOTHESIS_OUTPUT"),
        MockResponse::text("PREDICTIONS_OUTPUT"),
        MockResponse::error(ModelError::Api {
            message: "backend unavailable".to_string(),
            status_code: Some(503),
        }),
    ]);
    let pipeline = ResearchPipeline::new(Arc::new(client), PipelineConfig::default());

    let mut context = StageContext::new();
    let mut recorder = RunRecorder::new(tmp.path()).unwrap();
    let err = pipeline
        .execute(QUESTION, &mut context, &mut recorder)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(StageId::Experiments));
    assert!(err.to_string().contains("experiments"));
    assert!(err.to_string().contains("backend unavailable"));

    // Stages before the failure survive; the failing stage and everything
    // after it are absent.
    assert!(context.contains(StageId::Observations));
    assert!(context.contains(StageId::Hypothesis));
    assert!(context.contains(StageId::Predictions));
    assert!(!context.contains(StageId::Experiments));
    assert!(!context.contains(StageId::Analysis));
    assert!(!context.contains(StageId::Conclusion));

    // Best-effort record of the partial run still round-trips.
    let path = recorder.write_final_record(QUESTION, &context).unwrap();
    let record: methodic::recorder::ResearchRecord =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(record.question, QUESTION);
    assert_eq!(record.predictions.as_deref(), Some("PREDICTIONS_OUTPUT"));
    assert!(record.experiments.is_none());
    assert!(record.conclusion.is_none());
}

#[tokio::test]
async fn run_log_gets_a_block_per_completed_stage() {
    let tmp = tempfile::tempdir().unwrap();
    let client = fingerprinted_client(&[
        "OBSERVATIONS_OUTPUT",
        "HYPOTHESIS_OUTPUT",
        "PREDICTIONS_OUTPUT",
        "EXPERIMENTS_OUTPUT",
        "DATA_OUTPUT",
        "ANALYSIS_OUTPUT",
        "CONCLUSION_OUTPUT",
    ]);
    let pipeline = ResearchPipeline::new(client, PipelineConfig::default());

    let mut context = StageContext::new();
    let mut recorder = RunRecorder::new(tmp.path()).unwrap();
    pipeline
        .execute(QUESTION, &mut context, &mut recorder)
        .await
        .unwrap();

    let log = std::fs::read_to_string(recorder.log_path()).unwrap();
    for stage in [
        "observations",
        "hypothesis",
        "predictions",
        "experiments",
        "experimental_data",
        "analysis",
        "conclusion",
    ] {
        assert!(
            log.contains(&format!("Stage: {}", stage)),
            "log is missing a block for stage '{}'",
            stage
        );
    }
    assert!(log.contains("CONCLUSION_OUTPUT"));
}
