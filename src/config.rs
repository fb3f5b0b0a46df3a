use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub default_language: Option<String>,
    pub summary_model: Option<String>,
    pub qa_model: Option<String>,
}

impl Config {
    /// Load config from ~/.config/ytq/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytq")
        .join("config.toml")
}

/// Bearer credential for the completion endpoint; absence is fatal for
/// summarize/ask.
pub fn openrouter_api_key() -> Result<String> {
    std::env::var("OPENROUTER_API_KEY").map_err(|_| Error::Config("OPENROUTER_API_KEY"))
}

/// API key for the video search and details endpoints; absence is fatal for
/// search.
pub fn youtube_api_key() -> Result<String> {
    std::env::var("YOUTUBE_API_KEY").map_err(|_| Error::Config("YOUTUBE_API_KEY"))
}
