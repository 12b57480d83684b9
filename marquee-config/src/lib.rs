//! Configuration loading for the marquee runner.
//!
//! Accepts JSON by default and TOML when the file path ends in `.toml`.
//! Every field has a default, so an empty `{}` document is a valid config.

use marquee_core::label::MAX_TEXT_LEN;
use marquee_core::{DEFAULT_SPEED, SPEED_RANGE};
use serde::Deserialize;
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON parse error: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Frames rendered per second.
    #[serde(default = "default_framerate")]
    pub framerate: u32,
    /// Initial shared speed multiplier.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Labels spawned at startup. The 5-label cap still applies.
    #[serde(default)]
    pub labels: Vec<String>,
}

fn default_framerate() -> u32 {
    60
}

fn default_speed() -> f32 {
    DEFAULT_SPEED
}

impl Default for Config {
    fn default() -> Self {
        Self {
            framerate: default_framerate(),
            speed: default_speed(),
            labels: Vec::new(),
        }
    }
}

/// Load and validate a configuration file, dispatching on the extension.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: Config = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    validate(&config)?;
    Ok(config)
}

/// Check range constraints. Called by [`load_config`] and again by the
/// runner after CLI overrides are applied.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.framerate == 0 {
        return Err(ConfigError::Validation("framerate cannot be zero".to_string()));
    }
    if !SPEED_RANGE.contains(&config.speed) {
        return Err(ConfigError::Validation(format!(
            "speed {} outside [{}, {}]",
            config.speed,
            SPEED_RANGE.start(),
            SPEED_RANGE.end()
        )));
    }
    for text in &config.labels {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Validation("label text cannot be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_TEXT_LEN {
            return Err(ConfigError::Validation(format!(
                "label text \"{trimmed}\" longer than {MAX_TEXT_LEN} characters"
            )));
        }
    }
    Ok(())
}
