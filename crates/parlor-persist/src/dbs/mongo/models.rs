use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use parlor_llm::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::models::Conversation;

/// MongoDB-specific Conversation model (uses ObjectId)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConversation {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub owner_id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl MongoConversation {
    pub fn new(owner_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            owner_id: owner_id.into(),
            messages: Vec::new(),
            created_at: now,
            last_message_at: now,
            active: true,
        }
    }
}

impl From<MongoConversation> for Conversation {
    fn from(conversation: MongoConversation) -> Self {
        Self {
            id: conversation.id.to_hex(),
            owner_id: conversation.owner_id,
            messages: conversation.messages,
            created_at: conversation.created_at,
            last_message_at: conversation.last_message_at,
            active: conversation.active,
        }
    }
}
