use async_trait::async_trait;
use parlor_llm::ChatMessage;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{PersistError, Result};
use crate::models::Conversation;
use crate::store::ConversationStore;

/// Process-local store, used in tests and when no database is reachable
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, conversation_id: &str) -> Option<Conversation> {
        self.conversations.read().await.get(conversation_id).cloned()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn find_active(&self, owner_id: &str) -> Result<Option<Conversation>> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .values()
            .filter(|c| c.owner_id == owner_id && c.active)
            .max_by_key(|c| c.last_message_at)
            .cloned())
    }

    async fn create(&self, owner_id: &str) -> Result<Conversation> {
        let conversation = Conversation::new(owner_id);
        self.conversations
            .write()
            .await
            .insert(conversation.id.clone(), conversation.clone());
        Ok(conversation)
    }

    async fn append_message(&self, conversation_id: &str, message: ChatMessage) -> Result<()> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(conversation_id)
            .ok_or_else(|| PersistError::ConversationNotFound(conversation_id.to_string()))?;
        conversation.push(message);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
