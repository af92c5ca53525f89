//! Config store for loading and saving decree.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{DecreeConfig, parser, paths::default_config_path};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at the platform default location.
    pub fn with_defaults() -> anyhow::Result<Self> {
        Ok(Self::from_path(default_config_path()?))
    }

    pub fn from_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub fn load(&self) -> anyhow::Result<DecreeConfig> {
        if !self.config_path.exists() {
            return Ok(DecreeConfig::new());
        }
        parser::parse_decree_toml(&self.config_path)
    }

    pub fn save(&self, config: &DecreeConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}
