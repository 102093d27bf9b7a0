use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use protocol::{Envelope, Frame};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::{SendError, SpawnError};

/// Sending half of one actor's mailbox.
#[derive(Debug, Clone)]
pub struct Address {
    name: Arc<str>,
    sender: mpsc::UnboundedSender<Frame>,
}

impl Address {
    pub(crate) fn new(name: &str, sender: mpsc::UnboundedSender<Frame>) -> Self {
        Self {
            name: Arc::from(name),
            sender,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn send(&self, envelope: &Envelope) -> Result<(), SendError> {
        let frame = envelope.encode()?;
        self.send_frame(frame)
    }

    /// Push an already encoded frame. Delivery is FIFO per sender.
    pub fn send_frame(&self, frame: Frame) -> Result<(), SendError> {
        self.sender
            .send(frame)
            .map_err(|_| SendError::MailboxClosed(self.name.to_string()))
    }
}

/// Resolves well-known actor names to mailboxes.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    entries: Arc<DashMap<String, Address>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, address: Address) -> Result<(), SpawnError> {
        match self.entries.entry(address.name().to_string()) {
            Entry::Occupied(_) => Err(SpawnError::NameTaken(address.name().to_string())),
            Entry::Vacant(slot) => {
                slot.insert(address);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Address> {
        self.entries.get(name).map(|r| r.value().clone())
    }

    pub fn send(&self, to: &str, envelope: &Envelope) -> Result<(), SendError> {
        let address = self
            .lookup(to)
            .ok_or_else(|| SendError::UnknownActor(to.to_string()))?;
        address.send(envelope)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    pub(crate) fn clear(&self) {
        self.entries.clear();
    }
}
