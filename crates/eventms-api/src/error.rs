// Error taxonomy for the request boundary
//
// Every failure a handler can produce maps to a fixed status code and a
// structured JSON body here; nothing propagates to the client raw.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed, missing, or out-of-range input. Carries the per-field
    /// message list shown to the client.
    #[error("Validation Error")]
    Validation(Vec<String>),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A syntactically invalid identifier, rejected before any lookup.
    #[error("Invalid {0} ID format")]
    InvalidId(&'static str),

    /// Uniqueness violation (email, attendee roster).
    #[error("{0}")]
    Duplicate(String),

    /// Credential mismatch on login.
    #[error("{0}")]
    Auth(String),

    /// Unexpected internal failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        ApiError::Duplicate(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        ApiError::Auth(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(messages) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validation Error", "messages": messages }),
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::InvalidId(entity) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Invalid {entity} ID format") }),
            ),
            ApiError::Duplicate(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::Auth(message) => (StatusCode::UNAUTHORIZED, json!({ "error": message })),
            ApiError::Internal(err) => {
                tracing::error!("Unhandled internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Server Error", "message": err.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_messages() {
        let err = ApiError::Validation(vec!["Title is required".to_string()]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["messages"][0], "Title is required");
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = ApiError::not_found("Event not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Event not found");
    }

    #[tokio::test]
    async fn invalid_id_maps_to_400() {
        let response = ApiError::InvalidId("user").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid user ID format");
    }

    #[tokio::test]
    async fn duplicate_maps_to_400() {
        let response = ApiError::duplicate("User is already an attendee").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "User is already an attendee");
    }

    #[tokio::test]
    async fn auth_maps_to_401() {
        let response = ApiError::auth("Password doesn't match").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn internal_maps_to_500_server_error_body() {
        let response = ApiError::Internal(anyhow::anyhow!("pool exhausted")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Server Error");
        assert_eq!(body["message"], "pool exhausted");
    }
}
