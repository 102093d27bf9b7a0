use thiserror::Error;

use crate::envelope::Envelope;

/// An encoded envelope as it travels through a mailbox.
pub type Frame = String;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode envelope: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("frame is not a valid envelope: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Envelope {
    pub fn encode(&self) -> Result<Frame, CodecError> {
        serde_json::to_string(self).map_err(CodecError::Encode)
    }

    pub fn decode(frame: &str) -> Result<Envelope, CodecError> {
        serde_json::from_str(frame).map_err(CodecError::Decode)
    }
}
