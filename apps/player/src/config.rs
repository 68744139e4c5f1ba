//! Startup configuration from the environment.

use paraules_core::types::{GameSettings, LetterCase};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be true or false, got {value:?}")]
    InvalidBool { var: &'static str, value: String },
}

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub game: GameSettings,
    pub vocabulary_path: Option<PathBuf>,
    pub muted: bool,
    pub log_filter: String,
}

impl Settings {
    /// Read settings from the process environment (after `.env`, if any).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = GameSettings::default();

        let round_size = match lookup("PARAULES_ROUND_SIZE") {
            Some(value) => parse_number("PARAULES_ROUND_SIZE", &value)?,
            None => defaults.round_size,
        };

        let round_sizes = match lookup("PARAULES_ROUND_SIZES") {
            Some(value) => split_list(&value)
                .iter()
                .map(|size| parse_number("PARAULES_ROUND_SIZES", size))
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.round_sizes,
        };

        let letter_case = match lookup("PARAULES_UPPERCASE") {
            Some(value) => LetterCase::from_uppercase(parse_bool("PARAULES_UPPERCASE", &value)?),
            None => defaults.letter_case,
        };

        let voice_preferences = match lookup("PARAULES_VOICE_LANGS") {
            Some(value) => split_list(&value),
            None => defaults.voice_preferences,
        };

        let muted = match lookup("PARAULES_MUTE") {
            Some(value) => parse_bool("PARAULES_MUTE", &value)?,
            None => false,
        };

        Ok(Self {
            game: GameSettings {
                round_size,
                round_sizes,
                letter_case,
                voice_preferences,
            },
            vocabulary_path: lookup("PARAULES_VOCABULARY")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            muted,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info".into()),
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
