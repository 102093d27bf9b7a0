use async_trait::async_trait;
use protocol::Envelope;
use std::sync::Arc;

use crate::directory::Directory;
use crate::error::SendError;

/// A unit of sequential message handling with private state.
///
/// The runtime never calls `handle` concurrently for the same actor, and a
/// panic inside `handle` is contained to that one message.
#[async_trait]
pub trait Actor: Send + 'static {
    async fn handle(&mut self, envelope: Envelope, ctx: &Context);
}

/// What a handler can see of the outside world: its own name and the directory.
#[derive(Debug, Clone)]
pub struct Context {
    name: Arc<str>,
    directory: Directory,
}

impl Context {
    pub(crate) fn new(name: &str, directory: Directory) -> Self {
        Self {
            name: Arc::from(name),
            directory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn send(&self, to: &str, envelope: &Envelope) -> Result<(), SendError> {
        self.directory.send(to, envelope)
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }
}
