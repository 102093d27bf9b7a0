pub mod actor;
pub mod command;
pub mod frontend;

pub use actor::ConversationActor;
pub use command::{Action, Command};
pub use frontend::ChatFrontend;
