//! Shared vocabulary of the news bot actors: the envelope every actor
//! exchanges, the intents it can carry and the entity categories the
//! extraction side understands.

pub mod category;
pub mod codec;
pub mod envelope;
pub mod intent;
pub mod session;

pub use category::Category;
pub use codec::{CodecError, Frame};
pub use envelope::Envelope;
pub use intent::Intent;
pub use session::SessionId;

/// Well-known actor names used for addressing.
pub mod names {
    pub const CONVERSATION: &str = "conversation";
    pub const EXTRACTOR: &str = "extractor";
    pub const CLUSTERER: &str = "clusterer";
}
