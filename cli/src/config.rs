//! Configuration file handling for the CLI.
//!
//! Stores the service base URL in `$XDG_CONFIG_HOME/newsletter-admin/config.toml`
//! (platform equivalents elsewhere).

use anyhow::{Context, Result};
use directories::ProjectDirs;
use newsletter_admin_business::BusinessConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration stored on disk
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Origin of the newsletter service, e.g. `https://medtech-newsletter.de`
    pub base_url: Option<String>,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("de", "medtech", "newsletter-admin")
            .context("Failed to determine config directory")?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location; a missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn base_url(&self) -> Option<&str> {
        self.service
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.service.base_url = Some(url.trim().to_owned());
    }

    pub fn clear_base_url(&mut self) {
        self.service.base_url = None;
    }

    /// Effective service settings. `explicit` is the `--base-url` flag or
    /// its environment variable; it beats the file, which beats the built-in default.
    pub fn business_config(&self, explicit: Option<&str>) -> BusinessConfig {
        explicit
            .filter(|url| !url.trim().is_empty())
            .or(self.base_url())
            .map_or_else(BusinessConfig::default, BusinessConfig::new)
    }
}
