//! Configuration file discovery and loading

use super::RenderConfig;
use crate::Result;
use crate::error::TreelensError;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names in priority order
const CONFIG_FILE_NAMES: &[&str] = &[
    ".treelensrc.json",
    ".treelensrc.toml",
    "treelens.yaml",
    "treelens.yml",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Starts from the given directory and moves up the directory tree until
    /// a config is found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| TreelensError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            // Move up to parent directory
            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                // Reached filesystem root
                break;
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    ///
    /// Supports JSON (.json), TOML (.toml) and YAML (.yaml, .yml)
    pub fn load_from_file(path: &Path) -> Result<RenderConfig> {
        let content =
            fs::read_to_string(path).map_err(|e| TreelensError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed: std::result::Result<RenderConfig, String> = match ext {
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| e.to_string())
            }
            _ => Err("Unsupported file extension (expected .json, .toml, .yaml, or .yml)".into()),
        };

        parsed.map_err(|e| {
            TreelensError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load config from path or auto-discover
    ///
    /// If a custom path is provided, loads from that path. Otherwise the
    /// nearest discovered file is used, and defaults when there is none.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<RenderConfig> {
        let config_path = if let Some(path) = custom_path {
            if !path.exists() {
                return Err(TreelensError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        } else {
            let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
            Self::auto_discover(search_dir)?
        };

        match config_path {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(RenderConfig::default())
            }
        }
    }
}
