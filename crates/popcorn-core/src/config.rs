use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::PopcornError;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
}

/// Remote catalog endpoint settings.
///
/// Injected into the client at construction so tests can point it at a
/// local stub instead of the real service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Where the watched list is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File name inside the platform data directory; an absolute path is
    /// used as-is.
    pub watched_file: String,
}

impl AppConfig {
    /// Load config: the user file if it exists, built-in defaults otherwise.
    pub fn load() -> Result<Self, PopcornError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            let content = std::fs::read_to_string(&user_path)
                .map_err(|e| PopcornError::Config(e.to_string()))?;
            toml::from_str(&content).map_err(|e| PopcornError::Config(e.to_string()))
        } else {
            toml::from_str(DEFAULT_CONFIG).map_err(|e| PopcornError::Config(e.to_string()))
        }
    }

    /// Save the current config to the user config file.
    pub fn save(&self) -> Result<(), PopcornError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PopcornError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Path to the user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Resolve the watched-list slot from the storage settings.
    pub fn watched_path(&self) -> PathBuf {
        let file = PathBuf::from(&self.storage.watched_file);
        if file.is_absolute() {
            return file;
        }
        Self::project_dirs()
            .map(|d| d.data_dir().join(&file))
            .unwrap_or(file)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "popcorn")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
