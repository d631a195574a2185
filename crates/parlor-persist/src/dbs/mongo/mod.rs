mod client;
mod models;

pub use client::MongoConversationStore;
pub use models::MongoConversation;
