use crate::error::Result;
use crate::types::{ChatMessage, ModerationResult, RunStatus};
use async_trait::async_trait;

/// Trait for stateful, thread-based assistant providers
///
/// A thread accumulates messages; a run asks the configured assistant to
/// process the thread asynchronously. Callers poll the run until it settles.
#[async_trait]
pub trait AssistantsClient: Send + Sync {
    /// Create a new empty thread and return its id
    async fn create_thread(&self) -> Result<String>;

    /// Append a user-authored message to a thread
    async fn post_user_message(&self, thread_id: &str, content: &str) -> Result<()>;

    /// Start processing the thread with the given assistant, returning the run id
    async fn start_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        instructions: &str,
    ) -> Result<String>;

    /// One-shot status read, never waits
    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus>;

    /// Assistant-authored messages of a thread, oldest first
    async fn list_assistant_messages(&self, thread_id: &str) -> Result<Vec<ChatMessage>>;

    /// Whether the configured credential is accepted by the provider
    async fn check_credentials(&self) -> bool;

    /// Screen content before sending it
    async fn moderate(&self, content: &str) -> Result<ModerationResult>;
}
