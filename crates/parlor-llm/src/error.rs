use thiserror::Error;

/// Failures talking to the assistants provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    /// Transport, authentication or server-side failure
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider does not know the thread id
    #[error("Invalid thread: {0}")]
    InvalidThread(String),

    /// Missing or rejected assistant configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, AssistantError>;

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::ProviderUnavailable(err.to_string())
    }
}
