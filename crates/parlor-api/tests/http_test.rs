mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::IntoResponse,
};
use common::{app, memory_store, FakeAssistant};
use parlor_api::ApiError;
use parlor_chat::ChatError;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn chat_request(user_id: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, user_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_missing_message_is_rejected_without_provider_calls() {
    let client = Arc::new(FakeAssistant::replying("Hello!"));
    let app = app(client.clone(), None);

    for body in [r#"{}"#, r#"{"message": ""}"#, r#"{"message": "   "}"#, "not json"] {
        let response = app.clone().oneshot(chat_request(None, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json = json_body(response).await;
        assert_eq!(json["error"], "Message is required");
    }

    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_chat_returns_reply_and_thread() {
    let client = Arc::new(FakeAssistant::replying("Hello!"));
    let app = app(client, None);

    let response = app
        .oneshot(chat_request(Some("alice"), r#"{"message": "Hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json, json!({ "message": "Hello!", "threadId": "thread_1" }));
}

#[tokio::test]
async fn test_distinct_users_get_distinct_threads() {
    let client = Arc::new(FakeAssistant::replying("Hello!"));
    let app = app(client, None);

    let first = json_body(
        app.clone()
            .oneshot(chat_request(Some("alice"), r#"{"message": "Hi"}"#))
            .await
            .unwrap(),
    )
    .await;
    let second = json_body(
        app.clone()
            .oneshot(chat_request(Some("bob"), r#"{"message": "Hi"}"#))
            .await
            .unwrap(),
    )
    .await;
    let again = json_body(
        app.oneshot(chat_request(Some("alice"), r#"{"message": "Again"}"#))
            .await
            .unwrap(),
    )
    .await;

    assert_ne!(first["threadId"], second["threadId"]);
    assert_eq!(first["threadId"], again["threadId"]);
}

#[tokio::test]
async fn test_failed_run_reports_details() {
    let client = Arc::new(FakeAssistant::failing_runs());
    let app = app(client, None);

    let response = app
        .oneshot(chat_request(None, r#"{"message": "Hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Failed to process message");
    assert!(json["details"].as_str().unwrap().contains("failed"));
}

#[tokio::test]
async fn test_stuck_run_reports_poll_exhaustion() {
    let app = app(Arc::new(FakeAssistant::stuck()), None);

    let response = app
        .oneshot(chat_request(None, r#"{"message": "Hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Failed to process message");
    assert!(json["details"].as_str().unwrap().contains("pending"));
}

#[tokio::test]
async fn test_health_and_index() {
    let app = app(Arc::new(FakeAssistant::replying("Hello!")), None);

    let response = app.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));

    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Chatbot API is running");
    assert_eq!(json["endpoints"]["chat"], "/api/chat");
}

#[tokio::test]
async fn test_history_records_each_exchange() {
    let app = app(Arc::new(FakeAssistant::replying("Hello!")), Some(memory_store()));

    let response = app
        .clone()
        .oneshot(chat_request(Some("carol"), r#"{"message": "Hi"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/chat/history", Some("carol")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "messages": [
            { "role": "user", "content": "Hi" },
            { "role": "assistant", "content": "Hello!" }
        ]})
    );

    // Other callers see nothing
    let response = app.oneshot(get("/api/chat/history", Some("dave"))).await.unwrap();
    assert_eq!(json_body(response).await, json!({ "messages": [] }));
}

#[tokio::test]
async fn test_history_without_store_is_unavailable() {
    let app = app(Arc::new(FakeAssistant::replying("Hello!")), None);

    let response = app.oneshot(get("/api/chat/history", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_openapi_document_lists_chat_route() {
    let app = app(Arc::new(FakeAssistant::replying("Hello!")), None);

    let response = app.oneshot(get("/api/openapi.json", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert!(json["paths"]["/api/chat"]["post"].is_object());
}

#[test]
fn test_error_status_mapping() {
    let cases = [
        (ApiError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
        (
            ApiError::Chat(ChatError::ContentFlagged {
                categories: vec!["harassment".into()],
            }),
            StatusCode::BAD_REQUEST,
        ),
        (
            ApiError::Chat(ChatError::NoAssistantReply),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (
            ApiError::Chat(ChatError::PollTimeout { attempts: 3 }),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (ApiError::Unavailable("down".into()), StatusCode::SERVICE_UNAVAILABLE),
        (
            ApiError::TimedOut(std::time::Duration::from_secs(1)),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, status) in cases {
        assert_eq!(error.into_response().status(), status);
    }
}
