//! Dawn CLI, the main entry point.
//!
//! Commands:
//! - `serve`   : start the chat gateway
//! - `prompt`  : print the instruction document for a message
//! - `config`  : inspect configuration
//! - `doctor`  : diagnose setup

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "dawn",
    about = "Dawn - chat gateway for parents with vaccine questions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of ~/.dawn/config.toml
    #[arg(short, long, global = true, env = "DAWN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP chat gateway
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the composed instruction document without calling the model
    Prompt {
        /// The parent's message
        #[arg(short, long)]
        message: String,

        /// Change stage (pre_contemplation, contemplation, preparation)
        #[arg(short, long)]
        stage: Option<String>,

        /// Trust level shown to the model
        #[arg(short, long)]
        trust_level: Option<String>,

        /// Concern tag, repeatable
        #[arg(short = 'C', long = "concern")]
        concerns: Vec<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Diagnose setup
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (API key redacted)
    Show,
    /// Print the default config file path
    Path,
    /// Load and validate the configuration
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(config_path, host, port).await?,
        Commands::Prompt {
            message,
            stage,
            trust_level,
            concerns,
        } => commands::prompt::run(config_path, &message, stage, trust_level, concerns)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path)?,
            ConfigAction::Path => commands::config_cmd::path(config_path),
            ConfigAction::Validate => commands::config_cmd::validate(config_path)?,
        },
        Commands::Doctor => commands::doctor::run(config_path),
    }

    Ok(())
}
