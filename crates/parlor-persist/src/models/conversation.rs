use chrono::{DateTime, Utc};
use parlor_llm::{ChatMessage, HistoryMessage, Role};
use serde::{Deserialize, Serialize};

/// Database-agnostic conversation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub owner_id: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
    pub active: bool,
}

impl Conversation {
    pub fn new(owner_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            messages: Vec::new(),
            created_at: now,
            last_message_at: now,
            active: true,
        }
    }

    /// Append a message and move `last_message_at` forward
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) -> &ChatMessage {
        let message = ChatMessage::new(role, content);
        self.push(message)
    }

    /// Append an already-built message
    pub fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        // Never move backwards, even for back-dated messages
        self.last_message_at = self.last_message_at.max(message.timestamp).max(Utc::now());
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// History as `{role, content}` pairs, ready to send to the provider
    pub fn provider_history(&self) -> Vec<HistoryMessage> {
        self.messages.iter().map(ChatMessage::to_history).collect()
    }
}
