use anyhow::{Context, Result};
use async_trait::async_trait;
use extract::OllamaClient;

use crate::engine::ClusteringEngine;

/// Asks a local Ollama model which news topic an article belongs to.
#[derive(Clone, Default)]
pub struct OllamaTopicClient {
    client: OllamaClient,
}

impl OllamaTopicClient {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }

    fn build_topic_prompt(&self, article: &str) -> String {
        format!(
            r#"Which news topic does the following article belong to?

Answer with a short label of at most five words (for example "Politics", "Sports", "Technology") and nothing else.

ARTICLE:
{}

TOPIC:"#,
            article
        )
    }
}

#[async_trait]
impl ClusteringEngine for OllamaTopicClient {
    async fn cluster(&self, article: &str) -> Result<String> {
        let prompt = self.build_topic_prompt(article);
        let label = self.client.generate(&prompt, None)
            .await
            .context("Failed to label article topic")?;

        let label = label.trim();
        if label.is_empty() {
            anyhow::bail!("model returned an empty topic label");
        }
        Ok(label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_article() {
        let client = OllamaTopicClient::default();
        let prompt = client.build_topic_prompt("The match ended 2-1.");
        assert!(prompt.contains("The match ended 2-1."));
        assert!(prompt.trim_end().ends_with("TOPIC:"));
    }
}
