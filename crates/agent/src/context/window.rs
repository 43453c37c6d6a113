//! Conversation history windowing.

use dawn_core::message::ConversationTurn;

/// Number of trailing turns kept per request.
pub const HISTORY_WINDOW: usize = 6;

/// The trailing `min(size, turns.len())` turns, order preserved.
///
/// Borrows from the input so the prompt text and the upstream message list
/// can be built from the very same slice.
pub fn window(turns: &[ConversationTurn], size: usize) -> &[ConversationTurn] {
    &turns[turns.len().saturating_sub(size)..]
}
