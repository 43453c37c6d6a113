//! Error envelope for every failed request.
//!
//! All failures are normalized here into `{ "error": ..., ...details }` with
//! the status code of their category. CORS headers are added by the router
//! layers, so they are present on these responses too.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dawn_core::error::ProviderError;
use serde::Serialize;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad or missing input (400).
    #[error("{0}")]
    Validation(String),

    /// Method other than POST or OPTIONS (405).
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The client's quota is used up (429).
    #[error("Rate limit reached")]
    RateLimitExceeded { limit: u32 },

    /// The completion service answered with a non-success status (502).
    #[error("AI service error")]
    Upstream { status: u16 },

    /// Anything else, including malformed bodies and transport failures (500).
    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<u16>,
}

pub fn rate_limit_message(limit: u32) -> String {
    format!(
        "You've reached the demo limit of {limit} messages. This helps us manage costs while sharing this prototype. Thank you for your interest in DAWN!"
    )
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(msg) => ErrorBody {
                error: msg.clone(),
                message: None,
                details: None,
            },
            ApiError::MethodNotAllowed => ErrorBody {
                error: "Method not allowed".into(),
                message: None,
                details: None,
            },
            ApiError::RateLimitExceeded { limit } => ErrorBody {
                error: "Rate limit reached".into(),
                message: Some(rate_limit_message(*limit)),
                details: None,
            },
            ApiError::Upstream { status } => ErrorBody {
                error: "AI service error".into(),
                message: None,
                details: Some(*status),
            },
            ApiError::Internal(msg) => ErrorBody {
                error: "Internal server error".into(),
                message: Some(msg.clone()),
                details: None,
            },
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        match e {
            // The body was already logged by the provider; only the status leaves.
            ProviderError::ApiError { status_code, .. } => ApiError::Upstream {
                status: status_code,
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            error!(error = %msg, "Request failed");
        }
        (self.status(), Json(self.body())).into_response()
    }
}
