use parlor_chat::ChatOrchestrator;
use parlor_persist::ConversationStore;
use std::sync::Arc;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The orchestrator owns the thread registry, so every handler sees the same
/// user → thread mapping. `store` is `None` when persistence is disabled or
/// the database was unreachable at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chat: Arc<ChatOrchestrator>,
    pub store: Option<Arc<dyn ConversationStore>>,
}

impl AppState {
    pub fn new(
        config: Config,
        chat: ChatOrchestrator,
        store: Option<Arc<dyn ConversationStore>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            chat: Arc::new(chat),
            store,
        }
    }
}
