use async_trait::async_trait;
use parlor_llm::ChatMessage;

use crate::error::Result;
use crate::models::Conversation;

/// Trait for conversation persistence operations
///
/// Implementations provide database-specific storage
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Most recent active conversation of an owner
    async fn find_active(&self, owner_id: &str) -> Result<Option<Conversation>>;

    /// Create a new active conversation
    async fn create(&self, owner_id: &str) -> Result<Conversation>;

    /// Append a message and bump the conversation's `last_message_at`
    async fn append_message(&self, conversation_id: &str, message: ChatMessage) -> Result<()>;

    /// Cheap connectivity check
    async fn ping(&self) -> Result<()>;
}
