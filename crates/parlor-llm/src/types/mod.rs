pub mod message;
pub mod run;
pub mod moderation;

pub use message::{ChatMessage, HistoryMessage, Role};
pub use run::RunStatus;
pub use moderation::ModerationResult;
