//! Instruction document composition.
//!
//! The document is built from six sections in a fixed order:
//!
//! 1. **Ethical framework**: fixed text
//! 2. **Identity**: fixed text
//! 3. **Stage guidance**: approach, techniques, trust level
//! 4. **Concern guidance**: one block per resolved concern
//! 5. **Conversation history**: the windowed turns as `Parent:` / `Dawn:` lines
//! 6. **Response requirements**: fixed footer plus the literal current message
//!
//! # Determinism
//!
//! Composition is a pure function of its inputs. Nothing reads the clock, the
//! environment, or any shared state, so identical inputs always produce an
//! identical document.

use super::window::{HISTORY_WINDOW, window};
use crate::concern::{ConcernResolver, ResolvedConcern};
use crate::persona;
use crate::strategy::Stage;
use dawn_core::message::ConversationTurn;
use dawn_core::profile::ClientProfile;
use tracing::debug;

/// The composed instruction plus the message list sent upstream.
#[derive(Debug, Clone)]
pub struct AssembledContext {
    /// Instruction document, sent as the top-level system field.
    pub system_prompt: String,
    /// Windowed history followed by the current user turn.
    pub messages: Vec<ConversationTurn>,
    pub metadata: AssemblyMetadata,
}

/// What went into an assembled context. Safe to log: no message text.
#[derive(Debug, Clone)]
pub struct AssemblyMetadata {
    pub stage: Stage,
    pub concerns_rendered: usize,
    pub history_turns: usize,
    pub history_dropped: usize,
    pub prompt_chars: usize,
}

/// Builds Dawn's instruction document.
#[derive(Debug, Clone, Copy)]
pub struct PromptComposer {
    concerns: ConcernResolver,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl PromptComposer {
    pub fn new(dedupe_concerns: bool) -> Self {
        Self {
            concerns: ConcernResolver::new(dedupe_concerns),
        }
    }

    /// Compose the instruction document from the raw (unwindowed) history.
    pub fn compose(
        &self,
        profile: &ClientProfile,
        message: &str,
        history: &[ConversationTurn],
    ) -> String {
        let windowed = window(history, HISTORY_WINDOW);
        let concerns = self.concerns.resolve(profile.concerns());
        self.render(profile, &concerns, message, windowed)
    }

    /// Compose the document and the upstream message list from one windowing pass.
    pub fn assemble(
        &self,
        profile: &ClientProfile,
        message: &str,
        history: &[ConversationTurn],
    ) -> AssembledContext {
        let windowed = window(history, HISTORY_WINDOW);
        let concerns = self.concerns.resolve(profile.concerns());
        let system_prompt = self.render(profile, &concerns, message, windowed);

        let mut messages = Vec::with_capacity(windowed.len() + 1);
        messages.extend_from_slice(windowed);
        messages.push(ConversationTurn::user(message));

        let metadata = AssemblyMetadata {
            stage: Stage::resolve(profile.stage.as_deref()),
            concerns_rendered: concerns.len(),
            history_turns: windowed.len(),
            history_dropped: history.len() - windowed.len(),
            prompt_chars: system_prompt.chars().count(),
        };
        debug!(?metadata, "Assembled instruction document");

        AssembledContext {
            system_prompt,
            messages,
            metadata,
        }
    }

    fn render(
        &self,
        profile: &ClientProfile,
        concerns: &[ResolvedConcern],
        message: &str,
        windowed: &[ConversationTurn],
    ) -> String {
        let mut doc = String::new();
        doc.push_str(persona::ETHICAL_FRAMEWORK);
        doc.push_str(persona::IDENTITY);
        doc.push_str(&stage_guidance(profile));
        // The header follows the caller's list, even if every tag was unknown.
        if !profile.concerns().is_empty() {
            doc.push_str(&concern_guidance(concerns));
        }
        doc.push_str(&conversation_context(windowed));
        doc.push_str(&response_requirements(message));
        doc
    }
}

fn stage_guidance(profile: &ClientProfile) -> String {
    let stage = Stage::resolve(profile.stage.as_deref());
    let strategy = stage.strategy();
    let techniques = strategy
        .techniques
        .iter()
        .map(|t| format!("• {t}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nBEHAVIORAL STRATEGY FOR THIS PARENT:\nStage: {}\nApproach: {}\n\nTechniques to use:\n{}\n\nTrust level: {}\n",
        stage.as_str().to_uppercase(),
        strategy.approach,
        techniques,
        profile.trust_level(),
    )
}

fn concern_guidance(concerns: &[ResolvedConcern]) -> String {
    let mut section = String::from("\nCONCERN-SPECIFIC GUIDANCE:\n");
    for concern in concerns {
        section.push_str(&format!(
            "\nFor {}:\n- Validation: \"{}\"\n- Evidence: \"{}\"\n- Redirect: \"{}\"\n",
            concern.tag.label(),
            concern.record.validation,
            concern.record.evidence,
            concern.record.redirect,
        ));
    }
    section
}

fn conversation_context(windowed: &[ConversationTurn]) -> String {
    if windowed.is_empty() {
        return String::new();
    }
    let mut section = String::from("\nCONVERSATION HISTORY:\n");
    for turn in windowed {
        section.push_str(&format!("{}: {}\n", turn.role.speaker(), turn.content));
    }
    section
}

fn response_requirements(message: &str) -> String {
    format!(
        "{}\nParent's message: \"{message}\"\n\nGenerate Dawn's response:\n",
        persona::RESPONSE_REQUIREMENTS
    )
}
