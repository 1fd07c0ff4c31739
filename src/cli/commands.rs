use crate::llm::Provider;
use crate::search::SearchPolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// LLM-driven automation of the scientific method research workflow
#[derive(Parser, Debug)]
#[command(
    name = "methodic",
    about = "Automate the scientific method using LLM calls",
    version,
    author,
    long_about = "methodic runs a research question through the stages of the scientific \
                  method (observe, hypothesize, predict, design experiments, simulate data, \
                  analyze, conclude), with each stage's output feeding the next stage's \
                  prompt. It supports multiple AI backends (OpenAI, Claude, Gemini, Ollama, \
                  Grok, Groq) and persists a run log plus a structured JSON record.\n\n\
                  Examples:\n  \
                  methodic \"How does photosynthesis work?\"\n  \
                  methodic --question \"What causes earthquakes?\"\n  \
                  METHODIC_QUESTION=\"Why is the sky blue?\" methodic"
)]
pub struct CliArgs {
    #[arg(
        value_name = "QUESTION",
        help = "The research question to investigate"
    )]
    pub question_arg: Option<String>,

    #[arg(
        short = 'q',
        long = "question",
        value_name = "TEXT",
        help = "The research question to investigate (alternative flag form)"
    )]
    pub question: Option<String>,

    #[arg(long, help = "Skip the simulated experimental-data stage")]
    pub no_data: bool,

    #[arg(
        long,
        value_enum,
        default_value = "best-effort",
        help = "Web search behavior for the observation stage"
    )]
    pub search: SearchArg,

    #[arg(
        short = 'b',
        long,
        value_enum,
        help = "Model provider (default from METHODIC_PROVIDER, else openai)"
    )]
    pub provider: Option<Provider>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name to use (provider-specific, e.g., 'gpt-5' for OpenAI)"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Model request timeout in seconds"
    )]
    pub timeout: Option<u64>,

    #[arg(
        long,
        value_name = "N",
        help = "Cap on tokens generated per model response"
    )]
    pub max_tokens: Option<u32>,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Directory for the run log and results record (default: current directory)"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress stage output echo and non-error logs"
    )]
    pub quiet: bool,
}

/// Search policy as a CLI value
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchArg {
    /// Never search
    Off,
    /// Search, continue without results on failure
    BestEffort,
    /// Search, abort the run on failure
    Required,
}

impl From<SearchArg> for SearchPolicy {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::Off => SearchPolicy::Off,
            SearchArg::BestEffort => SearchPolicy::BestEffort,
            SearchArg::Required => SearchPolicy::Required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        // Verify that CLI structure is valid
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["methodic"]);
        assert!(args.question_arg.is_none());
        assert!(args.question.is_none());
        assert!(!args.no_data);
        assert_eq!(args.search, SearchArg::BestEffort);
        assert!(args.provider.is_none());
        assert!(args.model.is_none());
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_positional_question() {
        let args = CliArgs::parse_from(["methodic", "Why is the sky blue?"]);
        assert_eq!(args.question_arg.as_deref(), Some("Why is the sky blue?"));
    }

    #[test]
    fn test_question_flag_forms() {
        let args = CliArgs::parse_from(["methodic", "--question", "What causes earthquakes?"]);
        assert_eq!(args.question.as_deref(), Some("What causes earthquakes?"));

        let args = CliArgs::parse_from(["methodic", "-q", "What causes earthquakes?"]);
        assert_eq!(args.question.as_deref(), Some("What causes earthquakes?"));
    }

    #[test]
    fn test_no_data_flag() {
        let args = CliArgs::parse_from(["methodic", "--no-data", "q?"]);
        assert!(args.no_data);
    }

    #[test]
    fn test_search_values() {
        let args = CliArgs::parse_from(["methodic", "--search", "off"]);
        assert_eq!(args.search, SearchArg::Off);

        let args = CliArgs::parse_from(["methodic", "--search", "required"]);
        assert_eq!(args.search, SearchArg::Required);
    }

    #[test]
    fn test_backend_options() {
        let args = CliArgs::parse_from([
            "methodic",
            "--provider",
            "ollama",
            "--model",
            "qwen2.5:7b",
            "--timeout",
            "300",
            "--max-tokens",
            "4096",
            "--output-dir",
            "/tmp/runs",
        ]);
        assert_eq!(args.provider, Some(Provider::Ollama));
        assert_eq!(args.model.as_deref(), Some("qwen2.5:7b"));
        assert_eq!(args.timeout, Some(300));
        assert_eq!(args.max_tokens, Some(4096));
        assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/runs")));
    }

    #[test]
    fn test_search_policy_conversion() {
        assert_eq!(SearchPolicy::from(SearchArg::Off), SearchPolicy::Off);
        assert_eq!(
            SearchPolicy::from(SearchArg::BestEffort),
            SearchPolicy::BestEffort
        );
        assert_eq!(
            SearchPolicy::from(SearchArg::Required),
            SearchPolicy::Required
        );
    }
}
