use axum::Json;
use utoipa::OpenApi;

use super::{chat, health, index};

#[derive(OpenApi)]
#[openapi(
    paths(
        chat::send_message,
        chat::get_history,
        health::health_check,
        index::index,
    ),
    components(schemas(
        chat::ChatRequest,
        chat::ChatResponse,
        chat::HistoryResponse,
        health::HealthResponse,
        index::IndexResponse,
        index::Endpoints,
    )),
    tags(
        (name = "chat", description = "Assistant conversations"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

/// OpenAPI document for the service
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
