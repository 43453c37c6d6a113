//! Context assembly: history windowing and instruction document composition.

pub mod composer;
pub mod window;

pub use composer::{AssembledContext, AssemblyMetadata, PromptComposer};
pub use window::{HISTORY_WINDOW, window};
