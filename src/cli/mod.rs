pub mod commands;
pub mod handlers;

pub use commands::{CliArgs, SearchArg};
pub use handlers::{handle_run, run_pipeline};
