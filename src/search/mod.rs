//! Web search collaborator for the observation stage
//!
//! Search is an opaque external service: the observe stage may fold retrieved
//! snippets into its prompt, and nothing else in the pipeline touches it.

mod duckduckgo;

pub use duckduckgo::DuckDuckGoSearch;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the search collaborator
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP request failed
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Failed to decode search response: {message}")]
    Decode { message: String },
}

/// A single retrieved search result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// Result title
    pub title: String,
    /// Source URL
    pub url: String,
    /// Text snippet
    pub snippet: String,
}

/// What to do when search fails during the observe stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPolicy {
    /// Never search
    Off,
    /// Search, but continue without snippets if it fails
    #[default]
    BestEffort,
    /// Search, and abort the run if it fails
    Required,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchHit>, SearchError>;

    fn name(&self) -> &str;
}

/// Renders hits as a block of numbered snippets for inclusion in a prompt.
pub fn format_hits(hits: &[SearchHit]) -> String {
    let mut block = String::new();
    for (i, hit) in hits.iter().enumerate() {
        block.push_str(&format!(
            "{}. {} ({})\n   {}\n",
            i + 1,
            hit.title,
            hit.url,
            hit.snippet
        ));
    }
    block
}
