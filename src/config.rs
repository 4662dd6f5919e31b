//! Configuration loading.
//!
//! TOML file with serde defaults, resolved in order: explicit `--config`
//! path, the `GUIDESMITH_CONFIG` environment variable, then the platform
//! config directory. A missing file means defaults; an unreadable or
//! invalid file is a [`GuideError::Config`] error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GuideError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Input-size guard applied before the parser runs. Pathologically
    /// large bodies are rejected up front; the parser itself assumes a
    /// bounded in-memory string.
    #[serde(default = "default_max_import_bytes")]
    pub max_import_bytes: usize,
}

fn default_max_import_bytes() -> usize {
    1024 * 1024
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_import_bytes: default_max_import_bytes(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file location. Unset means the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration, falling back to defaults when no file exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("GUIDESMITH_CONFIG").ok().map(PathBuf::from));

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(GuideError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                path
            }
            None => {
                let Some(default) = default_config_path() else {
                    return Ok(Self::default());
                };
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)?;
        toml::from_str(&text)
            .map_err(|e| GuideError::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Database file location, honoring config, `GUIDESMITH_DB`, then the
    /// platform data directory.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        if let Ok(env_path) = std::env::var("GUIDESMITH_DB") {
            return PathBuf::from(env_path);
        }
        if let Some(path) = &self.database.path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join("guidesmith").join("guides.db"))
            .unwrap_or_else(|| PathBuf::from("guides.db"))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("guidesmith").join("config.toml"))
}
