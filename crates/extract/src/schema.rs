use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One entity mention found in an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(alias = "type", alias = "label")]
    pub category: String,
    #[serde(alias = "text", alias = "name")]
    pub value: String,
}

impl Annotation {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationResult {
    #[serde(alias = "entities")]
    pub annotations: Vec<Annotation>,
}

/// Turns article text into categorized entity mentions.
///
/// Labels are free-form; the extraction actor discards the ones it does not support.
#[async_trait]
pub trait AnnotationProvider: Send + Sync {
    async fn annotate(&self, article: &str) -> Result<Vec<Annotation>>;
}
