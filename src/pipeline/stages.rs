//! Fixed stage table and per-stage prompt construction
//!
//! Each stage is described by a `StageSpec`: its output identifier, a human
//! label for progress reporting, and a pure prompt builder over the context
//! accumulated so far. The table order is the execution order; a builder may
//! read any earlier stage's output and must not reference a later one.

use super::context::{StageContext, StageId};

/// Descriptor of one pipeline stage
pub struct StageSpec {
    /// Context key this stage populates
    pub id: StageId,
    /// Human label for progress output and logs
    pub label: &'static str,
    /// Builds the prompt from previously completed stages
    pub build_prompt: fn(&StageContext) -> String,
}

/// The full stage sequence, in execution order.
///
/// `experimental_data` is skipped at execution time when data generation is
/// disabled; every other stage always runs.
pub static STAGES: [StageSpec; 7] = [
    StageSpec {
        id: StageId::Observations,
        label: "Gathering observations",
        build_prompt: observe_prompt,
    },
    StageSpec {
        id: StageId::Hypothesis,
        label: "Formulating hypothesis",
        build_prompt: hypothesize_prompt,
    },
    StageSpec {
        id: StageId::Predictions,
        label: "Generating predictions",
        build_prompt: predict_prompt,
    },
    StageSpec {
        id: StageId::Experiments,
        label: "Designing experiments",
        build_prompt: experiment_prompt,
    },
    StageSpec {
        id: StageId::ExperimentalData,
        label: "Generating experimental data",
        build_prompt: experimental_data_prompt,
    },
    StageSpec {
        id: StageId::Analysis,
        label: "Analyzing results",
        build_prompt: analyze_prompt,
    },
    StageSpec {
        id: StageId::Conclusion,
        label: "Drawing conclusions",
        build_prompt: conclude_prompt,
    },
];

fn observe_prompt(context: &StageContext) -> String {
    format!(
        "You are a scientist beginning an investigation.\n\n\
         Question:\n{}\n\n\
         Provide initial observations and context relevant to this question.\n\
         Include known facts, background information, and what we already know about this topic.\n\
         Be concise but thorough.",
        context.text_or_pending(StageId::Question)
    )
}

fn hypothesize_prompt(context: &StageContext) -> String {
    format!(
        "Based on the following question and observations, formulate a clear, testable hypothesis.\n\n\
         Question:\n{}\n\n\
         Observations:\n{}\n\n\
         Provide a specific hypothesis that:\n\
         1. Is falsifiable\n\
         2. Makes a clear prediction\n\
         3. Can be tested through experimentation or further observation\n\n\
         Format your response as a single clear hypothesis statement.",
        context.text_or_pending(StageId::Question),
        context.text_or_pending(StageId::Observations)
    )
}

fn predict_prompt(context: &StageContext) -> String {
    format!(
        "Given this hypothesis, what specific, testable predictions can we make?\n\n\
         Question:\n{}\n\n\
         Hypothesis:\n{}\n\n\
         Generate 3-5 specific predictions that would support or refute this hypothesis.\n\
         Each prediction should be:\n\
         1. Specific and measurable\n\
         2. Directly testable\n\
         3. Clearly linked to the hypothesis\n\n\
         Format as a numbered list.",
        context.text_or_pending(StageId::Question),
        context.text_or_pending(StageId::Hypothesis)
    )
}

fn experiment_prompt(context: &StageContext) -> String {
    format!(
        "Design experiments to test these predictions.\n\n\
         Question:\n{}\n\n\
         Hypothesis:\n{}\n\n\
         Predictions:\n{}\n\n\
         For each prediction, describe:\n\
         1. The experimental method\n\
         2. What data to collect\n\
         3. How to control variables\n\
         4. Expected outcomes if hypothesis is correct vs. incorrect\n\n\
         Be specific and practical.",
        context.text_or_pending(StageId::Question),
        context.text_or_pending(StageId::Hypothesis),
        context.text_or_pending(StageId::Predictions)
    )
}

fn experimental_data_prompt(context: &StageContext) -> String {
    format!(
        "You are conducting the following experiments. Generate realistic simulated experimental data.\n\n\
         Question:\n{}\n\n\
         Hypothesis:\n{}\n\n\
         Predictions:\n{}\n\n\
         Experimental Design:\n{}\n\n\
         Generate realistic experimental data that would result from conducting these experiments.\n\
         Include:\n\
         1. Quantitative measurements (with realistic variability)\n\
         2. Observations\n\
         3. Data tables or results summaries\n\
         4. Any unexpected findings or anomalies\n\n\
         Make the data realistic and internally consistent. Format it clearly.\n\
         Clearly label everything as SIMULATED data, not real measurements.",
        context.text_or_pending(StageId::Question),
        context.text_or_pending(StageId::Hypothesis),
        context.text_or_pending(StageId::Predictions),
        context.text_or_pending(StageId::Experiments)
    )
}

fn analyze_prompt(context: &StageContext) -> String {
    let data_context = match context.get(StageId::ExperimentalData) {
        Some(data) => format!("\nExperimental Results (simulated):\n{}", data),
        None => "\nNote: No experimental data available. Provide theoretical analysis.".to_string(),
    };

    format!(
        "Analyze the experimental approach and draw conclusions.\n\n\
         Question:\n{}\n\n\
         Hypothesis:\n{}\n\n\
         Predictions:\n{}\n\n\
         Experimental Design:\n{}\n{}\n\n\
         Provide:\n\
         1. Analysis of how the experiments would test the hypothesis\n\
         2. What results would support vs. refute the hypothesis\n\
         3. Potential limitations or sources of error\n\
         4. Suggestions for follow-up investigations",
        context.text_or_pending(StageId::Question),
        context.text_or_pending(StageId::Hypothesis),
        context.text_or_pending(StageId::Predictions),
        context.text_or_pending(StageId::Experiments),
        data_context
    )
}

fn conclude_prompt(context: &StageContext) -> String {
    format!(
        "Synthesize the entire scientific investigation into a conclusion.\n\n\
         Question:\n{}\n\n\
         Hypothesis:\n{}\n\n\
         Predictions:\n{}\n\n\
         Analysis:\n{}\n\n\
         Provide:\n\
         1. Whether the hypothesis is supported, refuted, or requires modification\n\
         2. Key findings and insights\n\
         3. Implications of the results\n\
         4. Next steps for further research\n\n\
         Be clear and concise.",
        context.text_or_pending(StageId::Question),
        context.text_or_pending(StageId::Hypothesis),
        context.text_or_pending(StageId::Predictions),
        context.text_or_pending(StageId::Analysis)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_context() -> StageContext {
        let mut context = StageContext::new();
        context.set(StageId::Question, "QUESTION_TEXT").unwrap();
        context
            .set(StageId::Observations, "OBSERVATIONS_TEXT")
            .unwrap();
        context.set(StageId::Hypothesis, "HYPOTHESIS_TEXT").unwrap();
        context
            .set(StageId::Predictions, "PREDICTIONS_TEXT")
            .unwrap();
        context
            .set(StageId::Experiments, "EXPERIMENTS_TEXT")
            .unwrap();
        context
    }

    #[test]
    fn test_stage_order() {
        let ids: Vec<StageId> = STAGES.iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![
                StageId::Observations,
                StageId::Hypothesis,
                StageId::Predictions,
                StageId::Experiments,
                StageId::ExperimentalData,
                StageId::Analysis,
                StageId::Conclusion,
            ]
        );
    }

    #[test]
    fn test_observe_prompt_contains_question() {
        let mut context = StageContext::new();
        context.set(StageId::Question, "Why is the sky blue?").unwrap();

        let prompt = observe_prompt(&context);
        assert!(prompt.contains("Why is the sky blue?"));
    }

    #[test]
    fn test_hypothesize_prompt_threads_observations() {
        let context = seeded_context();
        let prompt = hypothesize_prompt(&context);
        assert!(prompt.contains("QUESTION_TEXT"));
        assert!(prompt.contains("OBSERVATIONS_TEXT"));
    }

    #[test]
    fn test_experimental_data_prompt_labels_simulation() {
        let context = seeded_context();
        let prompt = experimental_data_prompt(&context);
        assert!(prompt.contains("EXPERIMENTS_TEXT"));
        assert!(prompt.contains("simulated"));
    }

    #[test]
    fn test_analyze_prompt_with_data() {
        let mut context = seeded_context();
        context
            .set(StageId::ExperimentalData, "DATA_TEXT")
            .unwrap();

        let prompt = analyze_prompt(&context);
        assert!(prompt.contains("DATA_TEXT"));
        assert!(!prompt.contains("No experimental data available"));
    }

    #[test]
    fn test_analyze_prompt_without_data() {
        let context = seeded_context();
        let prompt = analyze_prompt(&context);
        assert!(prompt.contains("No experimental data available"));
        assert!(prompt.contains("theoretical analysis"));
    }

    #[test]
    fn test_conclude_prompt_threads_analysis() {
        let mut context = seeded_context();
        context.set(StageId::Analysis, "ANALYSIS_TEXT").unwrap();

        let prompt = conclude_prompt(&context);
        assert!(prompt.contains("HYPOTHESIS_TEXT"));
        assert!(prompt.contains("PREDICTIONS_TEXT"));
        assert!(prompt.contains("ANALYSIS_TEXT"));
    }
}
