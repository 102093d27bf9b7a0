use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::prompt;
use crate::schema::{Annotation, AnnotationProvider, AnnotationResult};

/// Thin client for Ollama's `/api/generate` endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>, // "json" for structured output
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            client: reqwest::Client::new(),
        }
    }

    pub async fn generate(&self, prompt: &str, format: Option<&str>) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));

        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            format: format.map(str::to_string),
        };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Ollama")?;

        if !response.status().is_success() {
            anyhow::bail!("Ollama request failed: {}", response.status());
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(ollama_response.response)
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(
            "http://localhost:11434".to_string(),
            "llama3".to_string(),
        )
    }
}

/// Annotation provider backed by a local Ollama model.
#[derive(Clone, Default)]
pub struct OllamaAnnotator {
    client: OllamaClient,
}

impl OllamaAnnotator {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnnotationProvider for OllamaAnnotator {
    async fn annotate(&self, article: &str) -> Result<Vec<Annotation>> {
        let prompt = prompt::build_annotation_prompt(article);
        let json_str = self.client.generate(&prompt, Some("json")).await?;
        parse_annotations(&json_str)
    }
}

/// Parse the model output. Invalid JSON is an error; there is no second attempt.
pub fn parse_annotations(json_str: &str) -> Result<Vec<Annotation>> {
    let result: AnnotationResult = serde_json::from_str(json_str.trim())
        .context("Failed to parse annotation result")?;
    Ok(result.annotations)
}
