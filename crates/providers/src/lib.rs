//! Completion service providers for Dawn.
//!
//! All providers implement the `dawn_core::Provider` trait.

pub mod anthropic;

pub use anthropic::AnthropicProvider;

use dawn_config::ProviderConfig;
use dawn_core::error::ProviderError;
use dawn_core::provider::Provider;
use std::sync::Arc;
use std::time::Duration;

/// Build the configured provider.
///
/// Fails with `NotConfigured` when no API key is available.
pub fn build_from_config(config: &ProviderConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            ProviderError::NotConfigured(
                "no Anthropic API key; set ANTHROPIC_API_KEY or provider.api_key".into(),
            )
        })?;

    let provider = AnthropicProvider::new(api_key, Duration::from_secs(config.timeout_secs))?
        .with_base_url(&config.base_url);
    Ok(Arc::new(provider))
}
