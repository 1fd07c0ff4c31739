//! DuckDuckGo instant-answer search provider

use super::{SearchError, SearchHit, SearchProvider};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const ENDPOINT: &str = "https://api.duckduckgo.com/";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const USER_AGENT: &str = concat!("methodic/", env!("CARGO_PKG_VERSION"));

/// Search provider backed by the DuckDuckGo instant-answer API.
///
/// No API key is required. Results come from the abstract and related topics
/// of the instant answer, which is shallow but good enough for seeding the
/// observation prompt with real-world context.
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(default, rename = "Heading")]
    heading: String,
    #[serde(default, rename = "AbstractText")]
    abstract_text: String,
    #[serde(default, rename = "AbstractURL")]
    abstract_url: String,
    #[serde(default, rename = "RelatedTopics")]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(default, rename = "Text")]
    text: String,
    #[serde(default, rename = "FirstURL")]
    first_url: String,
}

impl DuckDuckGoSearch {
    pub fn new() -> Result<Self, SearchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    fn hits_from_answer(answer: InstantAnswer, max_results: usize) -> Vec<SearchHit> {
        let mut hits = Vec::new();

        if !answer.abstract_text.is_empty() {
            hits.push(SearchHit {
                title: answer.heading,
                url: answer.abstract_url,
                snippet: answer.abstract_text,
            });
        }

        for topic in answer.related_topics {
            if hits.len() >= max_results {
                break;
            }
            if topic.text.is_empty() {
                continue;
            }
            // Topic text is "Title - snippet"; keep the whole line as snippet
            // and derive the title from the leading segment.
            let title = topic
                .text
                .split(" - ")
                .next()
                .unwrap_or(&topic.text)
                .to_string();
            hits.push(SearchHit {
                title,
                url: topic.first_url,
                snippet: topic.text,
            });
        }

        hits.truncate(max_results);
        hits
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        debug!("Searching DuckDuckGo: {}", query);

        let response = self
            .client
            .get(ENDPOINT)
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let answer: InstantAnswer =
            serde_json::from_str(&body).map_err(|e| SearchError::Decode {
                message: e.to_string(),
            })?;

        let hits = Self::hits_from_answer(answer, max_results);
        debug!("Search returned {} hit(s)", hits.len());

        Ok(hits)
    }

    fn name(&self) -> &str {
        "DuckDuckGo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_from_answer() {
        let answer = InstantAnswer {
            heading: "Sky".to_string(),
            abstract_text: "The sky appears blue due to Rayleigh scattering.".to_string(),
            abstract_url: "https://en.wikipedia.org/wiki/Sky".to_string(),
            related_topics: vec![
                RelatedTopic {
                    text: "Rayleigh scattering - scattering of light by small particles"
                        .to_string(),
                    first_url: "https://example.com/rayleigh".to_string(),
                },
                RelatedTopic {
                    text: String::new(),
                    first_url: "https://example.com/empty".to_string(),
                },
            ],
        };

        let hits = DuckDuckGoSearch::hits_from_answer(answer, 5);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Sky");
        assert_eq!(hits[1].title, "Rayleigh scattering");
    }

    #[test]
    fn test_hits_respect_max_results() {
        let answer = InstantAnswer {
            heading: "Topic".to_string(),
            abstract_text: "Abstract.".to_string(),
            abstract_url: String::new(),
            related_topics: (0..10)
                .map(|i| RelatedTopic {
                    text: format!("Topic {} - details", i),
                    first_url: format!("https://example.com/{}", i),
                })
                .collect(),
        };

        let hits = DuckDuckGoSearch::hits_from_answer(answer, 3);
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_parse_instant_answer_json() {
        let body = r#"{
            "Heading": "Sky",
            "AbstractText": "Blue because of scattering.",
            "AbstractURL": "https://en.wikipedia.org/wiki/Sky",
            "RelatedTopics": [
                {"Text": "Rayleigh scattering - light", "FirstURL": "https://x.test/r"}
            ]
        }"#;

        let answer: InstantAnswer = serde_json::from_str(body).unwrap();
        assert_eq!(answer.heading, "Sky");
        assert_eq!(answer.related_topics.len(), 1);
    }
}
