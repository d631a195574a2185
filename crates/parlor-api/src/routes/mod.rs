pub mod chat;
pub mod docs;
pub mod health;
pub mod index;
