//! Mailbox-driven actor runtime.
//!
//! Every actor owns its state and a single mailbox. The event loop pulls one
//! frame at a time, decodes it and hands it to [`Actor::handle`]; nothing else
//! touches the actor's state, so handlers need no locks.

pub mod actor;
pub mod directory;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod probe;
pub mod system;

pub use actor::{Actor, Context};
pub use directory::{Address, Directory};
pub use error::{SendError, SpawnError};
#[cfg(any(test, feature = "test-util"))]
pub use probe::Probe;
pub use system::{ActorSystem, panic_message};
