//! Application configuration, stored as TOML under the user config
//! directory. The `OPENWEATHER_API_KEY` environment variable overrides
//! the key from the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skycast_weather::{Lang, Units};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkycastConfig {
    /// OpenWeather API key. Empty until the user fills it in.
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub lang: Lang,
}

impl SkycastConfig {
    /// Load the config, writing a default file on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    /// API key with the environment override applied.
    pub fn effective_api_key(&self) -> String {
        std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| self.api_key.clone())
    }

    fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(dir.join("skycast"))
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Where the search history blob lives.
    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("history.json"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SkycastConfig::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.units, Units::Metric);
        assert_eq!(config.lang, Lang::Es);
    }

    #[test]
    fn test_parse_partial_file_fills_defaults() {
        let config: SkycastConfig = toml::from_str("api_key = \"abc123\"").unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.units, Units::Metric);
        assert_eq!(config.lang, Lang::Es);
    }

    #[test]
    fn test_parse_full_file() {
        let config: SkycastConfig = toml::from_str(
            "api_key = \"abc123\"\nunits = \"imperial\"\nlang = \"en\"\n",
        )
        .unwrap();
        assert_eq!(config.units, Units::Imperial);
        assert_eq!(config.lang, Lang::En);
    }

    #[test]
    fn test_first_run_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skycast").join("config.toml");

        let config = SkycastConfig::load_from(&path).unwrap();
        assert!(config.api_key.is_empty());
        assert!(path.exists());

        let reloaded = SkycastConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.units, Units::Metric);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = SkycastConfig {
            api_key: "abc123".to_string(),
            units: Units::Imperial,
            lang: Lang::En,
        };
        config.save_to(&path).unwrap();

        let reloaded = SkycastConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.api_key, "abc123");
        assert_eq!(reloaded.units, Units::Imperial);
        assert_eq!(reloaded.lang, Lang::En);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "units = [nope").unwrap();
        assert!(SkycastConfig::load_from(&path).is_err());
    }
}
