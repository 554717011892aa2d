// src/file/mod.rs
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use std::fs;
use tracing::{debug, warn};
use crate::config::SimulationConfig;

pub mod config;

pub const CONFIG_DIR_NAME: &str = "stockout-sim";
pub const CONFIG_FILE_NAME: &str = "config.ron";

// Core trait for file operations
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    UserDefault(PathBuf),
    BuiltIn,
}

#[derive(Debug)]
pub struct FileManager {
    config_handler: config::ConfigFileHandler,
    default_path: Option<PathBuf>,
}

impl FileManager {
    pub fn new() -> Self {
        Self {
            config_handler: config::ConfigFileHandler::new(),
            default_path: dirs::config_dir()
                .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)),
        }
    }

    /// Uses `path` instead of the platform config directory for the default file.
    pub fn with_default_path(path: Option<PathBuf>) -> Self {
        Self {
            config_handler: config::ConfigFileHandler::new(),
            default_path: path,
        }
    }

    pub fn default_path(&self) -> Option<&Path> {
        self.default_path.as_deref()
    }

    /// Explicit path first, then the user default file, then built-in defaults.
    pub fn resolve_config(&self, explicit: Option<&Path>) -> Result<(SimulationConfig, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
            debug!(path = %path.display(), "loading explicit config");
            let config = self.config_handler.load(path)?;
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        if let Some(path) = self.default_path.as_deref().filter(|p| p.exists()) {
            match self.config_handler.load(path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded user config");
                    return Ok((config, ConfigSource::UserDefault(path.to_path_buf())));
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring unreadable user config");
                }
            }
        }

        debug!("using built-in config");
        Ok((SimulationConfig::default(), ConfigSource::BuiltIn))
    }

    /// Writes the default configuration to `path`, creating parent directories.
    pub fn init_config(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow!("Refusing to overwrite existing file: {}", path.display()));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.config_handler.save(&SimulationConfig::default(), path)
    }
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn falls_back_to_built_in() {
        let dir = tempdir().unwrap();
        let manager = FileManager::with_default_path(Some(dir.path().join("missing.ron")));
        let (config, source) = manager.resolve_config(None).unwrap();
        assert_eq!(source, ConfigSource::BuiltIn);
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let manager = FileManager::with_default_path(None);
        assert!(manager.resolve_config(Some(&dir.path().join("nope.ron"))).is_err());
    }

    #[test]
    fn init_then_resolve_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let manager = FileManager::with_default_path(Some(path.clone()));

        manager.init_config(&path).unwrap();
        assert!(manager.init_config(&path).is_err());

        let (config, source) = manager.resolve_config(None).unwrap();
        assert_eq!(source, ConfigSource::UserDefault(path));
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn unreadable_default_uses_built_in() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "not ron at all (").unwrap();
        let manager = FileManager::with_default_path(Some(path));
        let (_, source) = manager.resolve_config(None).unwrap();
        assert_eq!(source, ConfigSource::BuiltIn);
    }
}
