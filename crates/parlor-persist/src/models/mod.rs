mod conversation;

// Export database-agnostic models
pub use conversation::Conversation;
