use anyhow::{anyhow, Result};
use std::sync::Arc;

use parlor_llm::AssistantsClient;

use crate::config::{ChatConfig, PollPolicy};
use crate::orchestrator::ChatOrchestrator;
use crate::registry::ThreadRegistry;

/// Builder for constructing a ChatOrchestrator with optional components
pub struct ChatOrchestratorBuilder {
    client: Option<Arc<dyn AssistantsClient>>,
    registry: Option<Arc<ThreadRegistry>>,
    config: ChatConfig,
}

impl ChatOrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            client: None,
            registry: None,
            config: ChatConfig::default(),
        }
    }

    /// Set the assistants client
    pub fn client(mut self, client: Arc<dyn AssistantsClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Share an existing registry (a fresh one is created otherwise)
    pub fn registry(mut self, registry: Arc<ThreadRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn config(mut self, config: ChatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn assistant_id(mut self, assistant_id: impl Into<String>) -> Self {
        self.config.assistant_id = assistant_id.into();
        self
    }

    pub fn poll_policy(mut self, poll: PollPolicy) -> Self {
        self.config.poll = poll;
        self
    }

    pub fn build(self) -> Result<ChatOrchestrator> {
        let client = self
            .client
            .ok_or_else(|| anyhow!("Assistants client is required"))?;
        let registry = self.registry.unwrap_or_default();

        if self.config.assistant_id.is_empty() {
            tracing::warn!("No assistant id configured, chat requests will fail");
        }

        Ok(ChatOrchestrator::new(client, registry, self.config))
    }
}

impl Default for ChatOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
