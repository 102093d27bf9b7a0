use anyhow::Result;
use async_trait::async_trait;

/// Assigns an article to a topic. The result text is relayed to the user as is.
#[async_trait]
pub trait ClusteringEngine: Send + Sync {
    async fn cluster(&self, article: &str) -> Result<String>;
}

/// Engine used when no clustering backend is configured. Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClusterer;

#[async_trait]
impl ClusteringEngine for UnavailableClusterer {
    async fn cluster(&self, _article: &str) -> Result<String> {
        anyhow::bail!("clustering is not available")
    }
}
