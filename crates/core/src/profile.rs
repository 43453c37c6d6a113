//! Client profile: the per-request description of the parent Dawn is talking to.
//!
//! Values arrive from outside the trust boundary, so the profile keeps them as
//! raw strings. The strategy and concern tables in `dawn-agent` resolve them
//! into closed enums and apply the documented fallbacks.

use serde::{Deserialize, Serialize};

/// Default trust level when the caller does not supply one.
pub const DEFAULT_TRUST_LEVEL: &str = "moderate";

/// Profile supplied by the caller with every chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    /// Behaviour-change stage label (e.g. "preparation")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    /// Free-form trust level (e.g. "low", "moderate")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_level: Option<String>,

    /// Concern tags raised by the parent, in the order given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concerns: Option<Vec<String>>,
}

impl ClientProfile {
    /// The trust level to render, falling back to "moderate" when absent or empty.
    pub fn trust_level(&self) -> &str {
        match self.trust_level.as_deref() {
            Some(level) if !level.is_empty() => level,
            _ => DEFAULT_TRUST_LEVEL,
        }
    }

    /// Concern tags as given, or an empty slice.
    pub fn concerns(&self) -> &[String] {
        self.concerns.as_deref().unwrap_or_default()
    }
}
