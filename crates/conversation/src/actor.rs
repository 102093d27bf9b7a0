use async_trait::async_trait;
use protocol::{Envelope, Intent, SessionId, names};
use runtime::{Actor, Context};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::command::{Action, Command, UNAVAILABLE};
use crate::frontend::ChatFrontend;

/// The only actor that talks to the chat front-end.
///
/// Translates user messages into requests for the other actors and relays
/// their responses back to the chat named by the envelope's session. Keeps no
/// state of its own.
pub struct ConversationActor {
    frontend: Arc<dyn ChatFrontend>,
}

impl ConversationActor {
    pub fn new(frontend: Arc<dyn ChatFrontend>) -> Self {
        Self { frontend }
    }

    async fn deliver(&self, chat: &SessionId, text: &str) {
        if let Err(e) = self.frontend.deliver(chat, text).await {
            warn!(chat = %chat, error = %e, "Failed to deliver chat message");
        }
    }

    #[instrument(skip(self, envelope, ctx), fields(chat = %envelope.session))]
    async fn on_user_message(&self, envelope: Envelope, ctx: &Context) {
        let chat = envelope.session;
        let text = envelope.payload.unwrap_or_default();

        match Command::parse(&text).into_action(&chat) {
            Action::Reply(reply) => self.deliver(&chat, &reply).await,
            Action::Forward { to, envelope, ack } => {
                debug!(to, intent = %envelope.intent, "Forwarding request");
                if let Err(e) = ctx.send(to, &envelope) {
                    warn!(to, error = %e, "Failed to forward request");
                    self.deliver(&chat, UNAVAILABLE).await;
                    return;
                }
                if let Some(ack) = ack {
                    self.deliver(&chat, ack).await;
                }
            }
        }
    }

    /// The front-end closed a chat. The extractor hears about it through this
    /// actor so the eviction queues behind every request already forwarded.
    async fn on_chat_closed(&self, chat: &SessionId, ctx: &Context) {
        let envelope = Envelope::new(Intent::EndSession).in_session(chat.clone());
        if let Err(e) = ctx.send(names::EXTRACTOR, &envelope) {
            warn!(chat = %chat, error = %e, "Failed to end extraction session");
        }
        if let Err(e) = self.frontend.close(chat).await {
            warn!(chat = %chat, error = %e, "Failed to close chat");
        }
        info!(chat = %chat, "Chat closed");
    }
}

#[async_trait]
impl Actor for ConversationActor {
    async fn handle(&mut self, envelope: Envelope, ctx: &Context) {
        if envelope.intent == Intent::UserMessage {
            return self.on_user_message(envelope, ctx).await;
        }

        match &envelope.intent {
            Intent::EndSession => self.on_chat_closed(&envelope.session, ctx).await,
            Intent::ResponseExtractFromArticle | Intent::ResponseGet | Intent::ResponseClusterArticle => {
                match envelope.payload.as_deref() {
                    Some(text) => {
                        info!(chat = %envelope.session, intent = %envelope.intent, "Relaying response");
                        self.deliver(&envelope.session, text).await;
                    }
                    None => warn!(intent = %envelope.intent, "Response without payload"),
                }
            }
            other => debug!(intent = %other, "Ignoring intent"),
        }
    }
}
