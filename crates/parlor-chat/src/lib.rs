pub mod config;
pub mod error;
pub mod registry;
pub mod orchestrator;
pub mod builder;

pub use config::{ChatConfig, PollPolicy, DEFAULT_INSTRUCTIONS};
pub use error::ChatError;
pub use registry::ThreadRegistry;
pub use orchestrator::{AssistantReply, ChatOrchestrator};
pub use builder::ChatOrchestratorBuilder;
