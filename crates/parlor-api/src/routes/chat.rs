use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use parlor_llm::HistoryMessage;
use parlor_persist::record_exchange;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Header carrying the caller's identity
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity used when the caller does not send one
pub const DEFAULT_USER_ID: &str = "default";

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub thread_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    #[schema(value_type = Vec<Object>)]
    pub messages: Vec<HistoryMessage>,
}

pub fn user_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_USER_ID)
        .to_string()
}

/// Send a message to the assistant
///
/// Relays the message to the caller's thread and waits for the reply
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    params(
        ("X-User-Id" = Option<String>, Header, description = "Caller identity, `default` when absent")
    ),
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Missing or rejected message"),
        (status = 500, description = "The assistant could not answer")
    ),
    tag = "chat"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let message = payload
        .ok()
        .and_then(|Json(req)| req.message)
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?;

    let user_id = user_id_from_headers(&headers);

    tracing::info!(user_id = %user_id, "Processing chat message");

    let reply = state.chat.respond(&user_id, &message).await?;

    if let Some(store) = &state.store {
        if let Err(e) = record_exchange(store.as_ref(), &user_id, &message, &reply.content).await {
            tracing::warn!(user_id = %user_id, "Failed to persist conversation: {}", e);
        }
    }

    Ok(Json(ChatResponse {
        message: reply.content,
        thread_id: reply.thread_id,
    }))
}

/// Get the caller's persisted conversation
#[utoipa::path(
    get,
    path = "/api/chat/history",
    params(
        ("X-User-Id" = Option<String>, Header, description = "Caller identity, `default` when absent")
    ),
    responses(
        (status = 200, description = "Messages of the active conversation", body = HistoryResponse),
        (status = 503, description = "Persistence is not available")
    ),
    tag = "chat"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<HistoryResponse>> {
    let store = state
        .store
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("Conversation history is not available".to_string()))?;

    let user_id = user_id_from_headers(&headers);
    let messages = store
        .find_active(&user_id)
        .await?
        .map(|conversation| conversation.provider_history())
        .unwrap_or_default();

    Ok(Json(HistoryResponse { messages }))
}
