pub mod config_cmd;
pub mod doctor;
pub mod prompt;
pub mod serve;

use dawn_config::{AppConfig, ConfigError};
use std::path::Path;

/// Load the config from `--config` or the default location.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    AppConfig::load(path)
}
