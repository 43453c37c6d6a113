//! Dawn's persona and prompt composition.
//!
//! Turns a caller-supplied profile, message, and conversation history into
//! the instruction document sent to the completion service:
//!
//! 1. **Select** the technique set for the caller's stage
//! 2. **Resolve** concern tags into validation / evidence / redirect guidance
//! 3. **Window** the conversation history to its trailing turns
//! 4. **Compose** everything into one deterministic document
//!
//! Nothing in this crate performs I/O or holds state between calls.

pub mod concern;
pub mod context;
pub mod persona;
pub mod strategy;

pub use concern::{ConcernRecord, ConcernResolver, ConcernTag, ResolvedConcern};
pub use context::{AssembledContext, AssemblyMetadata, HISTORY_WINDOW, PromptComposer, window};
pub use strategy::{Stage, StrategyRecord};
