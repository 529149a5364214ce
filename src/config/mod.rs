use std::path::Path;

use config::{Config, ConfigError};
use rocket::serde::Deserialize;

pub static CONFIG_LOCATION: &str = "./Flashback.toml";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde", default)]
pub struct WorkspaceConfig {
    /// the directory every document and folder lives under
    pub path: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde", default)]
pub struct DbConfig {
    pub location: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde", default)]
pub struct LoggingConfig {
    /// any of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(crate = "rocket::serde", default)]
pub struct FlashbackConfig {
    pub workspace: WorkspaceConfig,
    pub database: DbConfig,
    pub logging: LoggingConfig,
}

/// Parses the config file located at `location`, if it exists.
///
/// `Ok(None)` means there was no file to parse and the defaults should be used.
/// Missing keys in an existing file fall back to their defaults
pub fn parse_config(location: &str) -> Result<Option<FlashbackConfig>, ConfigError> {
    if !Path::new(location).exists() {
        return Ok(None);
    }
    Config::builder()
        .add_source(config::File::with_name(location))
        .build()?
        .try_deserialize()
        .map(Some)
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            path: "./workspace".to_string(),
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            location: "./flashback.sqlite".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
