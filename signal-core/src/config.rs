use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::forecast::SelectionStrategy;
use crate::model::Units;
use crate::provider::ProviderId;

/// The location the applet is configured to watch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityConfig {
    /// Canonical forecast-query URL, straight from the city catalog.
    pub url: String,
    /// Display label, e.g. "Austin, Texas (USA)".
    pub label: String,
}

/// Top-level configuration stored on disk.
///
/// The core treats this as read-only during a cycle; only the CLI's
/// configure flow mutates and saves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected city; `None` means the applet produces no signal.
    pub city: Option<CityConfig>,
    pub units: Units,
    /// Number of indicator lights, one forecast day per light.
    pub width: usize,
    pub strategy: SelectionStrategy,
    pub provider: ProviderId,
    /// Tab-separated city reference file.
    pub cities_file: PathBuf,
    /// Poll cadence for the `watch` command.
    pub poll_minutes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            city: None,
            units: Units::default(),
            width: 4,
            strategy: SelectionStrategy::default(),
            provider: ProviderId::default(),
            cities_file: PathBuf::from("cities.txt"),
            poll_minutes: 30,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-signal", "signal-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_city(&mut self, url: String, label: String) {
        self.city = Some(CityConfig { url, label });
    }
}
