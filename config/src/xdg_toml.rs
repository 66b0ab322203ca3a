//! Typed `$XDG_CONFIG_HOME/<app>/config.toml`.
//!
//! ```toml
//! [completion]
//! api_key = "sk-..."
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4o-mini"
//! temperature = 0.2
//! clarification = true
//!
//! [server]
//! addr = "127.0.0.1:8080"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::LoadError;

#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
pub(crate) struct FileConfig {
    #[serde(default)]
    pub completion: FileCompletion,
    #[serde(default)]
    pub server: FileServer,
}

#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
pub(crate) struct FileCompletion {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub clarification: Option<bool>,
}

#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
pub(crate) struct FileServer {
    pub addr: Option<String>,
}

fn xdg_config_path(app_name: &str) -> Result<Option<PathBuf>, LoadError> {
    let base = cross_xdg::BaseDirs::new().map_err(|e| LoadError::XdgPath(e.to_string()))?;
    let path = base.config_home().join(app_name).join("config.toml");
    if path.exists() {
        Ok(Some(path))
    } else {
        Ok(None)
    }
}

/// Reads the app's XDG config file. Missing file returns all-unset settings.
pub(crate) fn load_file(app_name: &str) -> Result<FileConfig, LoadError> {
    match xdg_config_path(app_name)? {
        Some(path) => read_file(&path),
        None => Ok(FileConfig::default()),
    }
}

pub(crate) fn read_file(path: &Path) -> Result<FileConfig, LoadError> {
    let content = std::fs::read_to_string(path).map_err(LoadError::XdgRead)?;
    Ok(toml::from_str(&content)?)
}
