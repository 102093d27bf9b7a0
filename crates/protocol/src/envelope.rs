use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::session::SessionId;

/// The unit every actor sends and receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub intent: Intent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default)]
    pub session: SessionId,
}

impl Envelope {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            payload: None,
            session: SessionId::default(),
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn in_session(mut self, session: SessionId) -> Self {
        self.session = session;
        self
    }

    /// Payload text, if present and not blank.
    pub fn text(&self) -> Option<&str> {
        self.payload
            .as_deref()
            .filter(|payload| !payload.trim().is_empty())
    }

    /// Build the response to this request in the same session.
    ///
    /// Returns `None` when the intent is not a request.
    pub fn reply(&self, payload: impl Into<String>) -> Option<Envelope> {
        let intent = self.intent.response()?;
        Some(
            Envelope::new(intent)
                .with_payload(payload)
                .in_session(self.session.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn test_reply_pairs_intent_and_keeps_session() {
        let request = Envelope::new(Intent::GetExtracted(Category::Person))
            .in_session(SessionId::new("chat-7"));

        let reply = request.reply("nothing").unwrap();
        assert_eq!(reply.intent, Intent::ResponseGet);
        assert_eq!(reply.session.as_str(), "chat-7");
        assert_eq!(reply.payload.as_deref(), Some("nothing"));
    }

    #[test]
    fn test_no_reply_for_responses() {
        let response = Envelope::new(Intent::ResponseGet).with_payload("x");
        assert!(response.reply("y").is_none());
    }

    #[test]
    fn test_blank_payload_has_no_text() {
        let envelope = Envelope::new(Intent::ExtractFromArticle).with_payload("   \n");
        assert_eq!(envelope.text(), None);
        assert_eq!(Envelope::new(Intent::ExtractFromArticle).text(), None);
    }
}
