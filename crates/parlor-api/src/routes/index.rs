use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Endpoints {
    pub chat: String,
    pub health: String,
    pub history: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: Endpoints,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = IndexResponse)
    ),
    tag = "health"
)]
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Chatbot API is running".to_string(),
        endpoints: Endpoints {
            chat: "/api/chat".to_string(),
            health: "/health".to_string(),
            history: "/api/chat/history".to_string(),
        },
    })
}
