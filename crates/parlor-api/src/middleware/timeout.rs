use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;

use crate::error::ApiError;

/// Replace the timeout layer's empty 408 with the usual error body
pub async fn map_timeout(State(limit): State<Duration>, response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::TimedOut(limit).into_response();
    }
    response
}
