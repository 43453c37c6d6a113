//! `dawn prompt`: render the instruction document locally.

use dawn_agent::PromptComposer;
use dawn_core::profile::ClientProfile;
use std::path::Path;

pub fn run(
    config_path: Option<&Path>,
    message: &str,
    stage: Option<String>,
    trust_level: Option<String>,
    concerns: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;

    let composer = PromptComposer::new(config.prompt.dedupe_concerns);
    print!("{}", render(&composer, message, stage, trust_level, concerns));
    Ok(())
}

fn render(
    composer: &PromptComposer,
    message: &str,
    stage: Option<String>,
    trust_level: Option<String>,
    concerns: Vec<String>,
) -> String {
    let profile = ClientProfile {
        stage,
        trust_level,
        concerns: (!concerns.is_empty()).then_some(concerns),
    };
    composer.compose(&profile, message, &[])
}
