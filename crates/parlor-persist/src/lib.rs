pub mod models;
pub mod error;
pub mod store;
pub mod memory;
pub mod recorder;
#[cfg(feature = "mongodb")]
pub mod dbs;

pub use models::Conversation;
pub use error::PersistError;
pub use store::ConversationStore;
pub use memory::InMemoryConversationStore;
pub use recorder::record_exchange;
#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoConversationStore;
