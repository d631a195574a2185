use async_trait::async_trait;
use parlor_api::{build_router, config::Config, state::AppState};
use parlor_chat::{ChatConfig, ChatOrchestrator, PollPolicy};
use parlor_llm::{
    AssistantsClient, ChatMessage, ModerationResult, Result, RunStatus,
};
use parlor_persist::{ConversationStore, InMemoryConversationStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Provider double: every run settles with `status` and the thread holds one reply
pub struct FakeAssistant {
    status: RunStatus,
    reply: String,
    calls: AtomicUsize,
    threads: AtomicUsize,
}

#[allow(dead_code)]
impl FakeAssistant {
    pub fn replying(reply: &str) -> Self {
        Self {
            status: RunStatus::Completed,
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            threads: AtomicUsize::new(0),
        }
    }

    pub fn failing_runs() -> Self {
        Self {
            status: RunStatus::Failed,
            ..Self::replying("unused")
        }
    }

    pub fn stuck() -> Self {
        Self {
            status: RunStatus::Queued,
            ..Self::replying("unused")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssistantsClient for FakeAssistant {
    async fn create_thread(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let n = self.threads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("thread_{}", n))
    }

    async fn post_user_message(&self, _thread_id: &str, _content: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn start_run(
        &self,
        _thread_id: &str,
        _assistant_id: &str,
        _instructions: &str,
    ) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("run_1".to_string())
    }

    async fn get_run_status(&self, _thread_id: &str, _run_id: &str) -> Result<RunStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.status)
    }

    async fn list_assistant_messages(&self, _thread_id: &str) -> Result<Vec<ChatMessage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![ChatMessage::assistant(self.reply.clone())])
    }

    async fn check_credentials(&self) -> bool {
        true
    }

    async fn moderate(&self, _content: &str) -> Result<ModerationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ModerationResult::default())
    }
}

#[allow(dead_code)]
pub fn app(
    client: Arc<FakeAssistant>,
    store: Option<Arc<dyn ConversationStore>>,
) -> axum::Router {
    let chat = ChatOrchestrator::new(
        client,
        Default::default(),
        ChatConfig::new("asst_test").with_poll(
            PollPolicy::new()
                .with_interval(Duration::from_millis(1))
                .with_max_attempts(3),
        ),
    );

    build_router(Arc::new(AppState::new(Config::default(), chat, store)))
}

#[allow(dead_code)]
pub fn memory_store() -> Arc<dyn ConversationStore> {
    Arc::new(InMemoryConversationStore::new())
}
