use protocol::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("no actor registered under `{0}`")]
    UnknownActor(String),
    #[error("mailbox of `{0}` is closed")]
    MailboxClosed(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("an actor named `{0}` is already registered")]
    NameTaken(String),
}
