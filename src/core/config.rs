//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::auth::DEFAULT_PASSPHRASE;
use crate::core::workspace::Workspace;

/// Default text-generation model for condition analysis
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// MoldMaster configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shared login passphrase
    pub passphrase: Option<String>,

    /// Fallback technician name for repair logs
    pub technician: Option<String>,

    /// Gemini API key for `mold analyze`
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    pub gemini_model: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order:
    /// defaults, global user config, workspace config, environment.
    pub fn load(workspace: Option<&Workspace>) -> Self {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            config.merge_file(&global_path);
        }

        if let Some(ws) = workspace {
            config.merge_file(&ws.state_dir().join("config.yaml"));
        }

        if let Ok(passphrase) = std::env::var("MOLDMASTER_PASSPHRASE") {
            config.passphrase = Some(passphrase);
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.gemini_api_key = Some(key);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "moldmaster")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        if let Ok(contents) = std::fs::read_to_string(path) {
            if let Ok(other) = serde_yml::from_str::<Config>(&contents) {
                self.merge(other);
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.passphrase.is_some() {
            self.passphrase = other.passphrase;
        }
        if other.technician.is_some() {
            self.technician = other.technician;
        }
        if other.gemini_api_key.is_some() {
            self.gemini_api_key = other.gemini_api_key;
        }
        if other.gemini_model.is_some() {
            self.gemini_model = other.gemini_model;
        }
    }

    /// The shared passphrase, falling back to the fixed default
    pub fn passphrase(&self) -> &str {
        self.passphrase.as_deref().unwrap_or(DEFAULT_PASSPHRASE)
    }

    /// The analysis model name
    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }
}
