use anyhow::Result;
use async_trait::async_trait;
use conversation::ChatFrontend;
use dashmap::{DashMap, DashSet};
use protocol::SessionId;
use std::sync::Arc;
use tracing::debug;

/// Chat front-end for HTTP clients: replies wait here until the client polls.
///
/// Once a chat is closed its queued replies are dropped, and so is anything
/// delivered for it afterwards.
#[derive(Clone, Default)]
pub struct HttpOutbox {
    pending: Arc<DashMap<SessionId, Vec<String>>>,
    closed: Arc<DashSet<SessionId>>,
}

impl HttpOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every reply queued for `chat`, oldest first.
    pub fn drain(&self, chat: &SessionId) -> Vec<String> {
        self.pending
            .remove(chat)
            .map(|(_, replies)| replies)
            .unwrap_or_default()
    }

    pub fn is_closed(&self, chat: &SessionId) -> bool {
        self.closed.contains(chat)
    }

    /// Mark `chat` closed and drop what is queued for it.
    pub fn close_chat(&self, chat: &SessionId) {
        self.closed.insert(chat.clone());
        self.pending.remove(chat);
    }

    pub fn pending_chats(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl ChatFrontend for HttpOutbox {
    async fn deliver(&self, chat: &SessionId, text: &str) -> Result<()> {
        if self.is_closed(chat) {
            debug!(chat = %chat, "Dropping reply for closed chat");
            return Ok(());
        }
        self.pending
            .entry(chat.clone())
            .or_default()
            .push(text.to_string());
        Ok(())
    }

    async fn close(&self, chat: &SessionId) -> Result<()> {
        self.close_chat(chat);
        Ok(())
    }
}
