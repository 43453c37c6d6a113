//! `dawn config`: configuration management commands.

use dawn_config::AppConfig;
use std::path::{Path, PathBuf};

pub fn validate(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    match super::load_config(config_path) {
        Ok(config) => {
            println!("   ok  Config parsed successfully");

            let warnings = warnings(&config);
            if warnings.is_empty() {
                println!("   ok  All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   warn  {w}");
                }
            }

            println!();
            println!("   Model:      {}", config.provider.model);
            println!("   Endpoint:   {}", config.provider.base_url);
            println!("   Gateway:    {}:{}", config.gateway.host, config.gateway.port);
            println!("   Rate limit: {}", config.rate_limit);
            println!("   History:    {} turns", dawn_agent::HISTORY_WINDOW);
        }
        Err(e) => {
            println!("   error  Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        super::load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    println!("{}", render_redacted(&config)?);
    Ok(())
}

pub fn path(config_path: Option<&Path>) {
    println!("{}", resolve_path(config_path).display());
}

fn resolve_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

fn render_redacted(config: &AppConfig) -> Result<String, toml::ser::Error> {
    let mut config = config.clone();
    if config.provider.api_key.is_some() {
        config.provider.api_key = Some("[REDACTED]".into());
    }
    toml::to_string_pretty(&config)
}

fn warnings(config: &AppConfig) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if !config.has_api_key() {
        warnings.push("No API key set (set ANTHROPIC_API_KEY or provider.api_key)");
    }
    if config.rate_limit == 0 {
        warnings.push("rate_limit is 0; every chat request will be rejected");
    }
    if config.gateway.host == "0.0.0.0" {
        warnings.push("Gateway bound to all interfaces");
    }
    warnings
}
