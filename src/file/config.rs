// src/file/config.rs
use super::FileHandler;
use crate::config::SimulationConfig;
use std::path::Path;
use std::fs;
use anyhow::{Result, Context};

#[derive(Debug)]
pub struct ConfigFileHandler;

impl ConfigFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<SimulationConfig> for ConfigFileHandler {
    fn load(&self, path: &Path) -> Result<SimulationConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        ron::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn save(&self, data: &SimulationConfig, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(
            data,
            ron::ser::PrettyConfig::new()
                .new_line("\n".to_string())
                .depth_limit(3)
                .separate_tuple_members(true)
        )?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
