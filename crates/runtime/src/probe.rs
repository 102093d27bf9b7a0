use async_trait::async_trait;
use protocol::Envelope;
use tokio::sync::mpsc;

use crate::actor::{Actor, Context};

/// Actor that hands every envelope it receives to a channel.
///
/// Useful to stand in for a peer (e.g. the conversation actor) and observe
/// exactly what was addressed to it.
pub struct Probe {
    sink: mpsc::UnboundedSender<Envelope>,
}

impl Probe {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (sink, received) = mpsc::unbounded_channel();
        (Self { sink }, received)
    }
}

#[async_trait]
impl Actor for Probe {
    async fn handle(&mut self, envelope: Envelope, _ctx: &Context) {
        let _ = self.sink.send(envelope);
    }
}
