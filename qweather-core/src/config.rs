use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

const DEFAULT_GEO_API_BASE: &str = "https://geoapi.qweather.com";
const DEFAULT_WEATHER_API_BASE: &str = "https://devapi.qweather.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk and handed to
/// [`QWeatherProvider::new`](crate::provider::qweather::QWeatherProvider) at
/// startup. Request-handling code never reads the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// QWeather API credential, sent as the `key` query parameter.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the geocoding API.
    #[serde(default = "default_geo_api_base")]
    pub geo_api_base: String,

    /// Base URL of the weather API.
    #[serde(default = "default_weather_api_base")]
    pub weather_api_base: String,

    /// Per-request timeout. A stalled upstream fails instead of hanging.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geo_api_base() -> String {
    DEFAULT_GEO_API_BASE.to_string()
}

fn default_weather_api_base() -> String {
    DEFAULT_WEATHER_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            geo_api_base: default_geo_api_base(),
            weather_api_base: default_weather_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = key;
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
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
        let dirs = ProjectDirs::from("dev", "qweather-bot", "qweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
