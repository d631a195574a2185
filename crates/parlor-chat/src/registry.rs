use parlor_llm::{AssistantsClient, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Maps application user ids to remote thread ids
///
/// Entries live for the lifetime of the process and are never evicted.
/// The remote thread is created outside the lock, so two first-time
/// resolutions for the same user may both create a thread; the first one
/// stored wins and every caller gets that id back.
#[derive(Debug, Default)]
pub struct ThreadRegistry {
    threads: RwLock<HashMap<String, String>>,
}

impl ThreadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thread id already mapped to a user, if any
    pub async fn get(&self, user_id: &str) -> Option<String> {
        self.threads.read().await.get(user_id).cloned()
    }

    /// Return the user's thread id, creating the remote thread on first use
    pub async fn resolve(&self, user_id: &str, client: &dyn AssistantsClient) -> Result<String> {
        if let Some(thread_id) = self.get(user_id).await {
            return Ok(thread_id);
        }

        let created = client.create_thread().await?;

        let mut threads = self.threads.write().await;
        let stored = threads
            .entry(user_id.to_string())
            .or_insert_with(|| created.clone())
            .clone();

        if stored == created {
            tracing::info!(user_id = %user_id, thread_id = %stored, "Mapped user to new thread");
        } else {
            tracing::debug!(
                user_id = %user_id,
                kept = %stored,
                orphaned = %created,
                "Concurrent thread creation, keeping first mapping"
            );
        }

        Ok(stored)
    }

    pub async fn len(&self) -> usize {
        self.threads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.threads.read().await.is_empty()
    }
}
