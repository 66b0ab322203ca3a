//! Load plainspeak settings from the process environment, a project `.env`, and XDG
//! `config.toml`, with priority: **existing env > .env > XDG**.
//!
//! The result is an explicit [`Settings`] value handed to constructors; nothing downstream
//! reads the environment again.
//!
//! | Setting                    | Environment                               | `config.toml`              |
//! |----------------------------|-------------------------------------------|----------------------------|
//! | completion API key         | `OPENAI_API_KEY`                          | `completion.api_key`       |
//! | completion base URL        | `OPENAI_BASE_URL` / `OPENAI_API_BASE`     | `completion.base_url`      |
//! | model                      | `PLAINSPEAK_MODEL`                        | `completion.model`         |
//! | temperature                | `PLAINSPEAK_TEMPERATURE`                  | `completion.temperature`   |
//! | clarifying questions       | `PLAINSPEAK_CLARIFICATION`                | `completion.clarification` |
//! | HTTP listen address        | `PLAINSPEAK_ADDR`                         | `server.addr`              |

mod dotenv_file;
mod xdg_toml;

use std::path::Path;
use thiserror::Error;

use xdg_toml::FileConfig;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const BASE_URL_ENV_ALT: &str = "OPENAI_API_BASE";
pub const MODEL_ENV: &str = "PLAINSPEAK_MODEL";
pub const TEMPERATURE_ENV: &str = "PLAINSPEAK_TEMPERATURE";
pub const CLARIFICATION_ENV: &str = "PLAINSPEAK_CLARIFICATION";
pub const ADDR_ENV: &str = "PLAINSPEAK_ADDR";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(String),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Completion provider settings. `None` means "use the consumer's default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionSettings {
    /// Blank values are normalized to `None`.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub clarification: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerSettings {
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub completion: CompletionSettings,
    pub server: ServerSettings,
}

impl Settings {
    /// Merges file values with an environment lookup; the lookup wins for every key it
    /// answers with a non-blank value.
    fn resolve<F>(file: FileConfig, env: F) -> Result<Self, LoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = var(API_KEY_ENV)
            .or(file.completion.api_key)
            .filter(|k| !k.trim().is_empty());
        let base_url = var(BASE_URL_ENV)
            .or_else(|| var(BASE_URL_ENV_ALT))
            .or(file.completion.base_url);
        let model = var(MODEL_ENV).or(file.completion.model);
        let temperature = match var(TEMPERATURE_ENV) {
            Some(v) => Some(parse_temperature(&v)?),
            None => file
                .completion
                .temperature
                .map(|t| check_temperature(FILE_TEMPERATURE_KEY, t, &t.to_string()))
                .transpose()?,
        };
        let clarification = match var(CLARIFICATION_ENV) {
            Some(v) => Some(parse_bool(CLARIFICATION_ENV, &v)?),
            None => file.completion.clarification,
        };
        let addr = var(ADDR_ENV).or(file.server.addr);

        Ok(Self {
            completion: CompletionSettings {
                api_key,
                base_url,
                model,
                temperature,
                clarification,
            },
            server: ServerSettings { addr },
        })
    }
}

const FILE_TEMPERATURE_KEY: &str = "completion.temperature";

fn parse_temperature(value: &str) -> Result<f32, LoadError> {
    let t = value.parse::<f32>().map_err(|_| LoadError::InvalidValue {
        key: TEMPERATURE_ENV,
        value: value.to_string(),
    })?;
    check_temperature(TEMPERATURE_ENV, t, value)
}

/// Temperature must lie in `0.0..=2.0` whichever source supplied it.
fn check_temperature(key: &'static str, t: f32, raw: &str) -> Result<f32, LoadError> {
    if (0.0..=2.0).contains(&t) {
        Ok(t)
    } else {
        Err(LoadError::InvalidValue {
            key,
            value: raw.to_string(),
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, LoadError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoadError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

/// Loads settings for `app_name`.
///
/// 1. Applies the project `.env` (from `override_dir`, else the current directory) to the
///    process environment, keeping variables that are already set.
/// 2. Reads `$XDG_CONFIG_HOME/<app_name>/config.toml` when present.
/// 3. Resolves each setting from the environment first, then the file.
pub fn load_settings(app_name: &str, override_dir: Option<&Path>) -> Result<Settings, LoadError> {
    dotenv_file::apply(override_dir)?;
    let file = xdg_toml::load_file(app_name)?;
    Settings::resolve(file, |key| std::env::var(key).ok())
}

/// Like [`load_settings`] but reads the TOML file at `config_path` instead of the XDG location.
pub fn load_settings_from_file(config_path: &Path, override_dir: Option<&Path>) -> Result<Settings, LoadError> {
    dotenv_file::apply(override_dir)?;
    let file = xdg_toml::read_file(config_path)?;
    Settings::resolve(file, |key| std::env::var(key).ok())
}
