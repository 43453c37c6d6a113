//! # Dawn Core
//!
//! Domain types, traits, and error definitions for the Dawn chat gateway.
//! This crate has **no framework dependencies**. It defines the domain model
//! the prompt composer, the provider, and the HTTP gateway all share.

pub mod error;
pub mod message;
pub mod profile;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::ProviderError;
pub use message::{ConversationTurn, Role};
pub use profile::ClientProfile;
pub use provider::{MAX_TOKENS, Provider, ProviderRequest, ProviderResponse, Usage};
