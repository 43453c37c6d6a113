//! Chat endpoint: quota check, prompt assembly, completion, quota write-back.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use dawn_core::message::ConversationTurn;
use dawn_core::profile::ClientProfile;
use dawn_core::provider::{MAX_TOKENS, ProviderRequest};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::SharedState;
use crate::error::ApiError;
use crate::quota;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub profile: Option<ClientProfile>,
    #[serde(default)]
    pub conversation_history: Option<Vec<ConversationTurn>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub messages_remaining: u32,
}

/// `POST` on any path.
pub async fn chat_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let limit = state.settings.rate_limit;
    let count = state.quota.read_count(&headers);
    if !quota::is_admitted(count, limit) {
        warn!(count, limit, "Message quota exhausted");
        return Err(ApiError::RateLimitExceeded { limit });
    }

    let body = body.map_err(body_rejection)?;
    let request: ChatRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Internal(format!("Invalid request body: {e}")))?;

    let message = request
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::Validation("Message is required".into()))?;
    let profile = request.profile.unwrap_or_default();
    let history = request.conversation_history.unwrap_or_default();

    let context = state.composer.assemble(&profile, &message, &history);
    info!(
        stage = %context.metadata.stage,
        concerns = context.metadata.concerns_rendered,
        history_turns = context.metadata.history_turns,
        history_dropped = context.metadata.history_dropped,
        message_len = message.len(),
        "Chat message accepted"
    );

    let completion = state
        .provider
        .complete(ProviderRequest {
            model: state.settings.model.clone(),
            system: Some(context.system_prompt),
            messages: context.messages,
            max_tokens: MAX_TOKENS,
        })
        .await?;

    if let Some(usage) = completion.usage {
        info!(
            model = %completion.model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Completion received"
        );
    }

    let mut response = Json(ChatResponse {
        response: completion.content,
        messages_remaining: limit - count - 1,
    })
    .into_response();
    state.quota.commit(count, response.headers_mut());
    Ok(response)
}

fn body_rejection(rejection: BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::Validation("Request body too large".into())
    } else {
        ApiError::Internal(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// `OPTIONS` on any path: empty 200, CORS headers come from the router layers.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
