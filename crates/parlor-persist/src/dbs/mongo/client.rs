use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use parlor_llm::ChatMessage;
use std::time::Duration;

use crate::dbs::mongo::models::MongoConversation;
use crate::error::{PersistError, Result};
use crate::models::Conversation;
use crate::store::ConversationStore;

const COLLECTION: &str = "chats";

#[derive(Clone)]
pub struct MongoConversationStore {
    database: Database,
    collection: Collection<MongoConversation>,
}

impl MongoConversationStore {
    /// Connect to MongoDB and create the store
    ///
    /// The driver connects lazily; call [`ConversationStore::ping`] to
    /// confirm the server is reachable. `timeout` bounds server selection.
    pub async fn connect(mongodb_uri: &str, database: &str, timeout: Duration) -> Result<Self> {
        let mut options = ClientOptions::parse(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        options.server_selection_timeout = Some(timeout);

        let client =
            Client::with_options(options).map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self::new(&client, database))
    }

    pub fn new(client: &Client, db_name: &str) -> Self {
        let database = client.database(db_name);
        let collection = database.collection(COLLECTION);
        Self {
            database,
            collection,
        }
    }
}

fn parse_id(conversation_id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(conversation_id).map_err(|e| PersistError::InvalidObjectId(e.to_string()))
}

#[async_trait]
impl ConversationStore for MongoConversationStore {
    async fn find_active(&self, owner_id: &str) -> Result<Option<Conversation>> {
        let filter = doc! { "owner_id": owner_id, "active": true };
        let conversation = self
            .collection
            .find_one(filter)
            .sort(doc! { "last_message_at": -1 })
            .await?;
        Ok(conversation.map(Into::into))
    }

    async fn create(&self, owner_id: &str) -> Result<Conversation> {
        let conversation = MongoConversation::new(owner_id);
        self.collection.insert_one(&conversation).await?;
        Ok(conversation.into())
    }

    async fn append_message(&self, conversation_id: &str, message: ChatMessage) -> Result<()> {
        let object_id = parse_id(conversation_id)?;

        let filter = doc! { "_id": object_id };
        let update = doc! {
            "$push": { "messages": bson::to_bson(&message)? },
            "$set": { "last_message_at": bson::to_bson(&Utc::now())? },
        };

        let result = self.collection.update_one(filter, update).await?;
        if result.matched_count == 0 {
            return Err(PersistError::ConversationNotFound(conversation_id.to_string()));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
