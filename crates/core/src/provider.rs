//! Provider trait: the abstraction over the completion service.
//!
//! A Provider sends one instruction document plus a list of conversation turns
//! to a language model and returns the generated reply. The gateway only sees
//! this trait, which keeps its tests free of network access.

use crate::error::ProviderError;
use crate::message::ConversationTurn;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Output token cap sent with every completion request.
pub const MAX_TOKENS: u32 = 500;

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model identifier (e.g. "claude-sonnet-4-20250514")
    pub model: String,

    /// Top-level system instruction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Conversation turns, oldest first, ending with the current user turn
    pub messages: Vec<ConversationTurn>,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated text
    pub content: String,

    /// Token usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// Which model actually responded
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// Implementations make exactly one attempt per call; retry policy, if any,
/// belongs to the caller.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g. "anthropic").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;
}
