// OpenAI Assistants client (HTTP direct, no SDK)

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::AssistantsConfig;
use crate::error::{AssistantError, Result};
use crate::openai::wire::{
    CreateMessageRequest, CreateRunRequest, ErrorEnvelope, MessageList, ModerationRequest,
    ModerationResponse, RunObject, ThreadObject,
};
use crate::traits::AssistantsClient;
use crate::types::{ChatMessage, ModerationResult, Role, RunStatus};

const OPENAI_BETA: &str = "openai-beta";
const ASSISTANTS_V2: &str = "assistants=v2";

/// What a request was addressing, used to classify provider errors
#[derive(Debug, Clone, Copy)]
enum Scope<'a> {
    Global,
    Thread(&'a str),
    /// Starting a run on a thread
    Run(&'a str),
    /// Reading an existing run: (thread id, run id)
    RunStatus(&'a str, &'a str),
}

pub struct OpenAIAssistantsClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIAssistantsClient {
    /// Create new client with API key against the public endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(AssistantsConfig::new(api_key))
    }

    pub fn from_config(config: AssistantsConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| AssistantError::Configuration("Invalid API key format".to_string()))?,
        );
        headers.insert(
            HeaderName::from_static(OPENAI_BETA),
            HeaderValue::from_static(ASSISTANTS_V2),
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AssistantError::ProviderUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and decode a successful JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, scope: Scope<'_>) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            AssistantError::ProviderUnavailable(format!("Failed to send request: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &error_text, scope));
        }

        response.json::<T>().await.map_err(|e| {
            AssistantError::ProviderUnavailable(format!("Failed to parse response: {}", e))
        })
    }
}

/// Map a non-2xx provider response onto the error taxonomy
fn classify_error(status: StatusCode, body: &str, scope: Scope<'_>) -> AssistantError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());

    match (status, scope) {
        (StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST, Scope::Run(_))
            if detail.to_lowercase().contains("assistant") =>
        {
            AssistantError::Configuration(detail)
        }
        (StatusCode::NOT_FOUND, Scope::RunStatus(thread_id, _))
            if detail.to_lowercase().contains("thread") =>
        {
            AssistantError::InvalidThread(format!("{}: {}", thread_id, detail))
        }
        (StatusCode::NOT_FOUND, Scope::RunStatus(_, run_id)) => {
            AssistantError::ProviderUnavailable(format!("Run {} not found: {}", run_id, detail))
        }
        (StatusCode::NOT_FOUND, Scope::Thread(thread_id) | Scope::Run(thread_id)) => {
            AssistantError::InvalidThread(format!("{}: {}", thread_id, detail))
        }
        _ => AssistantError::ProviderUnavailable(format!("OpenAI API error ({}): {}", status, detail)),
    }
}

// ============================================================================
// TRAIT IMPLEMENTATION
// ============================================================================

#[async_trait]
impl AssistantsClient for OpenAIAssistantsClient {
    async fn create_thread(&self) -> Result<String> {
        let request = self
            .http_client
            .post(format!("{}/threads", self.base_url))
            .json(&serde_json::json!({}));

        let thread: ThreadObject = self.send(request, Scope::Global).await?;
        tracing::debug!(thread_id = %thread.id, "Created remote thread");
        Ok(thread.id)
    }

    async fn post_user_message(&self, thread_id: &str, content: &str) -> Result<()> {
        let request = self
            .http_client
            .post(format!("{}/threads/{}/messages", self.base_url, thread_id))
            .json(&CreateMessageRequest {
                role: Role::User.as_str(),
                content,
            });

        let _: serde_json::Value = self.send(request, Scope::Thread(thread_id)).await?;
        Ok(())
    }

    async fn start_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        instructions: &str,
    ) -> Result<String> {
        if assistant_id.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "assistant id is not configured".to_string(),
            ));
        }

        let request = self
            .http_client
            .post(format!("{}/threads/{}/runs", self.base_url, thread_id))
            .json(&CreateRunRequest {
                assistant_id,
                instructions: (!instructions.is_empty()).then_some(instructions),
            });

        let run: RunObject = self.send(request, Scope::Run(thread_id)).await?;
        tracing::debug!(thread_id = %thread_id, run_id = %run.id, status = %run.status, "Started run");
        Ok(run.id)
    }

    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus> {
        let request = self
            .http_client
            .get(format!("{}/threads/{}/runs/{}", self.base_url, thread_id, run_id));

        let run: RunObject = self.send(request, Scope::RunStatus(thread_id, run_id)).await?;
        Ok(run.status)
    }

    async fn list_assistant_messages(&self, thread_id: &str) -> Result<Vec<ChatMessage>> {
        // Newest page first, then flip to chronological order
        let request = self
            .http_client
            .get(format!("{}/threads/{}/messages", self.base_url, thread_id))
            .query(&[("order", "desc")]);

        let list: MessageList = self.send(request, Scope::Thread(thread_id)).await?;
        let mut messages: Vec<ChatMessage> = list
            .data
            .into_iter()
            .filter(|m| m.role == Role::Assistant)
            .map(|m| m.into_chat_message())
            .collect();
        messages.reverse();
        Ok(messages)
    }

    async fn check_credentials(&self) -> bool {
        let request = self.http_client.get(format!("{}/models", self.base_url));

        match self.send::<serde_json::Value>(request, Scope::Global).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("API key validation error: {}", e);
                false
            }
        }
    }

    async fn moderate(&self, content: &str) -> Result<ModerationResult> {
        let request = self
            .http_client
            .post(format!("{}/moderations", self.base_url))
            .json(&ModerationRequest { input: content });

        let response: ModerationResponse = self.send(request, Scope::Global).await?;
        let entry = response.results.into_iter().next().ok_or_else(|| {
            AssistantError::ProviderUnavailable("Moderation response had no results".to_string())
        })?;

        Ok(ModerationResult {
            flagged: entry.flagged,
            categories: entry.categories,
        })
    }
}
