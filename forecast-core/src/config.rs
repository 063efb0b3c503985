use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const DEFAULT_LOCATIONS_PATH: &str = "data/locations.json";

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

/// Upstream weather provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationsConfig {
    #[serde(default = "default_locations_path")]
    pub path: PathBuf,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [server]
/// listen = "127.0.0.1:8080"
///
/// [upstream]
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
///
/// [locations]
/// path = "data/locations.json"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub locations: LocationsConfig,
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

fn default_forecast_url() -> String {
    DEFAULT_FORECAST_URL.to_string()
}

fn default_locations_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOCATIONS_PATH)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { forecast_url: default_forecast_url() }
    }
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self { path: default_locations_path() }
    }
}

impl Config {
    /// Load config from the platform config file, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit file. Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Explicit path when given, platform config file otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save config to the platform config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The upstream forecast endpoint as a URL.
    pub fn forecast_url(&self) -> Result<Url> {
        let url = Url::parse(&self.upstream.forecast_url).with_context(|| {
            format!("Invalid upstream forecast_url: {}", self.upstream.forecast_url)
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "Upstream forecast_url must use http or https, got '{}'",
                url.scheme()
            );
        }

        Ok(url)
    }
}
