use parlor_llm::{AssistantError, RunStatus};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Invalid thread: {0}")]
    InvalidThread(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Run ended with status: {status}")]
    RunTerminatedAbnormally { status: RunStatus },

    #[error("No response from assistant")]
    NoAssistantReply,

    #[error("Run still pending after {attempts} status checks")]
    PollTimeout { attempts: u32 },

    #[error("Content flagged by moderation: {}", .categories.join(", "))]
    ContentFlagged { categories: Vec<String> },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ChatError {
    /// Failure caused by the caller's input rather than the provider
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::ContentFlagged { .. })
    }
}

impl From<AssistantError> for ChatError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::ProviderUnavailable(msg) => ChatError::ProviderUnavailable(msg),
            AssistantError::InvalidThread(msg) => ChatError::InvalidThread(msg),
            AssistantError::Configuration(msg) => ChatError::Configuration(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
