use parlor_llm::{AssistantsClient, Role, RunStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use crate::registry::ThreadRegistry;

/// Reply produced for one user message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub content: String,
    pub thread_id: String,
}

/// Sends a user message to the user's thread and waits for the assistant
///
/// Holds no per-request state; the only thing mutated locally is the
/// registry entry created on a user's first message.
pub struct ChatOrchestrator {
    client: Arc<dyn AssistantsClient>,
    registry: Arc<ThreadRegistry>,
    config: ChatConfig,
}

impl ChatOrchestrator {
    pub fn new(
        client: Arc<dyn AssistantsClient>,
        registry: Arc<ThreadRegistry>,
        config: ChatConfig,
    ) -> Self {
        Self {
            client,
            registry,
            config,
        }
    }

    /// Create a builder for fluent construction
    pub fn builder() -> crate::builder::ChatOrchestratorBuilder {
        crate::builder::ChatOrchestratorBuilder::new()
    }

    pub fn registry(&self) -> &Arc<ThreadRegistry> {
        &self.registry
    }

    pub fn client(&self) -> &Arc<dyn AssistantsClient> {
        &self.client
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Send `content` on behalf of `user_id` and return the assistant's answer
    pub async fn respond(&self, user_id: &str, content: &str) -> Result<AssistantReply> {
        if content.trim().is_empty() {
            return Err(ChatError::InvalidRequest("Message is required".to_string()));
        }

        // 1. Resolve (or lazily create) the user's thread
        let thread_id = self.registry.resolve(user_id, self.client.as_ref()).await?;

        // 2. Optional content screen
        if self.config.moderation_enabled {
            let moderation = self.client.moderate(content).await?;
            if moderation.flagged {
                tracing::warn!(user_id = %user_id, "Message rejected by moderation");
                return Err(ChatError::ContentFlagged {
                    categories: moderation.flagged_categories(),
                });
            }
        }

        // 3. Append the message and start a run
        self.client.post_user_message(&thread_id, content).await?;
        let run_id = self
            .client
            .start_run(&thread_id, &self.config.assistant_id, &self.config.instructions)
            .await?;

        // 4. Wait for the run to settle
        self.wait_for_run(&thread_id, &run_id).await?;

        // 5. Pick the newest assistant message
        let messages = self.client.list_assistant_messages(&thread_id).await?;
        let reply = messages
            .into_iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .ok_or(ChatError::NoAssistantReply)?;

        tracing::info!(
            user_id = %user_id,
            thread_id = %thread_id,
            run_id = %run_id,
            "Assistant replied"
        );

        Ok(AssistantReply {
            content: reply.content,
            thread_id,
        })
    }

    /// Poll the run until it completes, fails, or the poll budget runs out
    async fn wait_for_run(&self, thread_id: &str, run_id: &str) -> Result<()> {
        let poll = &self.config.poll;
        let mut attempts: u32 = 0;

        loop {
            let status = self.client.get_run_status(thread_id, run_id).await?;
            attempts += 1;

            tracing::debug!(run_id = %run_id, status = %status, attempt = attempts, "Run status");

            match status {
                RunStatus::Completed => return Ok(()),
                s if s.is_abnormal() => {
                    tracing::warn!(run_id = %run_id, status = %s, "Run ended abnormally");
                    return Err(ChatError::RunTerminatedAbnormally { status: s });
                }
                _ => {}
            }

            if let Some(max) = poll.max_attempts {
                if attempts >= max {
                    tracing::warn!(run_id = %run_id, attempts, "Gave up waiting for run");
                    return Err(ChatError::PollTimeout { attempts });
                }
            }

            tokio::time::sleep(poll.interval).await;
        }
    }
}
