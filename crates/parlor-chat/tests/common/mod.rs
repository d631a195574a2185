use async_trait::async_trait;
use parlor_llm::{
    AssistantError, AssistantsClient, ChatMessage, ModerationResult, Result, RunStatus,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Assistants client that replays scripted run statuses and messages
#[derive(Default)]
pub struct ScriptedClient {
    statuses: Mutex<VecDeque<RunStatus>>,
    messages: Mutex<Vec<ChatMessage>>,
    posted: Mutex<Vec<(String, String)>>,
    flag_content: bool,
    fail_thread_creation: bool,
    threads_created: AtomicUsize,
    status_reads: AtomicUsize,
    runs_started: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedClient {
    pub fn new(statuses: Vec<RunStatus>, messages: Vec<ChatMessage>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            messages: Mutex::new(messages),
            ..Self::default()
        }
    }

    pub fn flagging(mut self) -> Self {
        self.flag_content = true;
        self
    }

    pub fn failing_thread_creation(mut self) -> Self {
        self.fail_thread_creation = true;
        self
    }

    pub fn threads_created(&self) -> usize {
        self.threads_created.load(Ordering::SeqCst)
    }

    pub fn status_reads(&self) -> usize {
        self.status_reads.load(Ordering::SeqCst)
    }

    pub fn runs_started(&self) -> usize {
        self.runs_started.load(Ordering::SeqCst)
    }

    pub fn posted(&self) -> Vec<(String, String)> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantsClient for ScriptedClient {
    async fn create_thread(&self) -> Result<String> {
        if self.fail_thread_creation {
            return Err(AssistantError::ProviderUnavailable("connection refused".to_string()));
        }
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("thread_{}", n))
    }

    async fn post_user_message(&self, thread_id: &str, content: &str) -> Result<()> {
        self.posted
            .lock()
            .unwrap()
            .push((thread_id.to_string(), content.to_string()));
        Ok(())
    }

    async fn start_run(
        &self,
        _thread_id: &str,
        assistant_id: &str,
        _instructions: &str,
    ) -> Result<String> {
        if assistant_id.is_empty() {
            return Err(AssistantError::Configuration("assistant id is not configured".to_string()));
        }
        let n = self.runs_started.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("run_{}", n))
    }

    async fn get_run_status(&self, _thread_id: &str, _run_id: &str) -> Result<RunStatus> {
        self.status_reads.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.statuses.lock().unwrap();
        // The last scripted status repeats once the script runs out
        let status = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().copied()
        };
        Ok(status.unwrap_or(RunStatus::Completed))
    }

    async fn list_assistant_messages(&self, _thread_id: &str) -> Result<Vec<ChatMessage>> {
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn check_credentials(&self) -> bool {
        true
    }

    async fn moderate(&self, _content: &str) -> Result<ModerationResult> {
        let mut categories = BTreeMap::new();
        categories.insert("harassment".to_string(), self.flag_content);
        Ok(ModerationResult {
            flagged: self.flag_content,
            categories,
        })
    }
}
