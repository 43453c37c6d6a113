//! Error types for the Dawn domain.
//!
//! Uses `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// Failures of the outbound completion call.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The service answered with a non-success status. `message` holds the
    /// raw body and must only be logged, never returned to a client.
    #[error("API request failed with status {status_code}")]
    ApiError { status_code: u16, message: String },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}
