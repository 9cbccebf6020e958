use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::advisory::normalizer::NormalizeError;
use crate::llm_client::LlmError;
use crate::products::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{ "error": <message>, "details"?: <json> }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate product: {0}")]
    Duplicate(String),

    #[error("Not found")]
    NotFound,

    #[error("Upstream error (status {status:?}): {body}")]
    Upstream { status: Option<u16>, body: String },

    #[error("Upstream timed out")]
    Timeout,

    #[error("Upstream returned an empty completion")]
    EmptyResponse,

    #[error("Malformed model response: {0}")]
    MalformedResponse(#[from] NormalizeError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Upstream { status, body } => AppError::Upstream { status, body },
            LlmError::Timeout(_) => AppError::Timeout,
            LlmError::EmptyResponse => AppError::EmptyResponse,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidName => AppError::Validation("Invalid product name.".to_string()),
            StoreError::Duplicate(name) => AppError::Duplicate(name),
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details): (StatusCode, String, Option<Value>) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Duplicate(_) => (
                StatusCode::BAD_REQUEST,
                "Product already exists.".to_string(),
                None,
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string(), None),
            AppError::Upstream { status, body } => {
                tracing::error!("Upstream error ({status:?}): {body}");
                // Pass structured upstream errors through as JSON when possible.
                let body = serde_json::from_str::<Value>(body)
                    .unwrap_or_else(|_| Value::String(body.clone()));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process request".to_string(),
                    Some(json!({ "status": status, "body": body })),
                )
            }
            AppError::Timeout => {
                tracing::error!("Upstream request timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "The AI service did not respond in time.".to_string(),
                    None,
                )
            }
            AppError::EmptyResponse => {
                tracing::error!("Upstream returned an empty completion");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Empty AI response".to_string(),
                    None,
                )
            }
            AppError::MalformedResponse(e) => {
                let message = match e {
                    NormalizeError::InvalidJson(_) => "AI response was not valid JSON.",
                    NormalizeError::Schema(_) => "AI response did not match the expected format.",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string(), None)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = match details {
            Some(details) => json!({ "error": message, "details": details }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}
