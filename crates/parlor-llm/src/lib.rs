pub mod types;
pub mod traits;
pub mod error;
pub mod config;
pub mod openai;

pub use traits::AssistantsClient;
pub use error::{AssistantError, Result};
pub use config::AssistantsConfig;
pub use openai::OpenAIAssistantsClient;
pub use types::{ChatMessage, Role, RunStatus, ModerationResult, HistoryMessage};
