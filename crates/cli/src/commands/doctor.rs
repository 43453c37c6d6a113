//! `dawn doctor`: diagnose setup.

use std::path::Path;

pub fn run(config_path: Option<&Path>) {
    println!("Dawn Doctor - Setup Diagnostics");
    println!("===============================\n");

    let mut issues = 0;

    let default_path = dawn_config::AppConfig::config_dir().join("config.toml");
    let file = config_path.unwrap_or(&default_path);
    if file.exists() {
        println!("  ok    Config file found at {}", file.display());
    } else {
        println!("  info  No config file at {}, defaults apply", file.display());
    }

    match super::load_config(config_path) {
        Ok(config) => {
            println!("  ok    Config valid");

            match dawn_providers::build_from_config(&config.provider) {
                Ok(provider) => println!("  ok    Provider ready ({})", provider.name()),
                Err(e) => {
                    println!("  warn  {e}");
                    issues += 1;
                }
            }

            if config.rate_limit == 0 {
                println!("  warn  rate_limit is 0, all chat requests will be rejected");
                issues += 1;
            } else {
                println!("  ok    Rate limit: {} messages/hour", config.rate_limit);
            }
        }
        Err(e) => {
            println!("  error Config invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }
}
