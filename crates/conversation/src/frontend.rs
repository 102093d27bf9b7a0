use anyhow::Result;
use async_trait::async_trait;
use protocol::SessionId;

/// Where replies for a chat end up (a bot API, an HTTP outbox, ...).
#[async_trait]
pub trait ChatFrontend: Send + Sync {
    async fn deliver(&self, chat: &SessionId, text: &str) -> Result<()>;

    /// The chat is gone; later deliveries for it may be discarded.
    async fn close(&self, _chat: &SessionId) -> Result<()> {
        Ok(())
    }
}
