use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parlor_chat::ChatError;
use parlor_persist::PersistError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to process message: {0}")]
    Chat(#[from] ChatError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("{0}")]
    Unavailable(String),

    #[error("Request timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::Chat(ChatError::InvalidRequest(message)) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::Chat(ref e) if e.is_client_error() => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Message rejected", "details": e.to_string() }),
            ),
            ApiError::Chat(ref e) => {
                tracing::error!("Chat error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to process message", "details": e.to_string() }),
                )
            }
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Storage error" }),
                )
            }
            ApiError::Unavailable(message) => {
                (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": message }))
            }
            ApiError::TimedOut(ref limit) => {
                tracing::error!("Request exceeded {:?}", limit);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to process message",
                        "details": format!("Request timed out after {:?}", limit)
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
