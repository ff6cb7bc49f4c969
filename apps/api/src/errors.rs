use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::normalizer::NormalizeError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid endpoint: {method} {endpoint}")]
    InvalidEndpoint { method: String, endpoint: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("The AI model returned an empty response")]
    EmptyResponse,

    #[error("Parsing failed: {reason}")]
    MalformedJson { raw: String, reason: String },

    #[error("Request to {endpoint} timed out after {timeout_ms}ms")]
    RequestTimeout { endpoint: String, timeout_ms: u64 },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::EmptyResponse => AppError::EmptyResponse,
            NormalizeError::MalformedJson { raw, reason } => AppError::MalformedJson { raw, reason },
        }
    }
}

impl AppError {
    /// True when the caller, not a collaborator, is at fault.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            AppError::Unauthorized | AppError::InvalidEndpoint { .. } | AppError::Validation(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::InvalidEndpoint { .. } => {
                (StatusCode::NOT_FOUND, "INVALID_ENDPOINT", self.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::EmptyResponse => (
                StatusCode::BAD_GATEWAY,
                "EMPTY_RESPONSE",
                "The AI Architect failed to generate content".to_string(),
            ),
            // The raw text is logged once, where it failed to parse.
            AppError::MalformedJson { .. } => (
                StatusCode::BAD_GATEWAY,
                "MALFORMED_JSON",
                "The AI response could not be understood".to_string(),
            ),
            AppError::RequestTimeout { .. } => {
                (StatusCode::GATEWAY_TIMEOUT, "REQUEST_TIMEOUT", self.to_string())
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Identity(msg) => {
                tracing::error!("Identity provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "IDENTITY_ERROR",
                    "The identity provider could not be reached".to_string(),
                )
            }
            AppError::Serialization(_) | AppError::Internal(_) => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
