//! Configuration management for flotten-rechner
//!
//! Config stored at: ~/.config/flotten-rechner/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use flotte_domain::service::CostParameters;
use flotte_types::{ConfigError, OutputFormat, Result, StorageBackend};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage backend (memory, json, sqlite)
    #[serde(default)]
    pub backend: StorageBackend,

    /// Data directory override
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Cost model policy values
    #[serde(default)]
    pub costs: CostParameters,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("flotten-rechner");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory for durable stores
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("flotten-rechner");
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::config_path()?, content)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }
}

/// Load cost parameters from a standalone TOML file
///
/// Missing keys keep their defaults, so a file can override a single price.
pub fn load_cost_parameters(path: &Path) -> Result<CostParameters> {
    let content = std::fs::read_to_string(path)?;
    let params: CostParameters = toml::from_str(&content)?;
    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_backend_is_json() {
        let config = Config::default();
        assert_eq!(config.backend, StorageBackend::Json);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn config_roundtrip_via_json() {
        let config = Config {
            backend: StorageBackend::Sqlite,
            data_dir: Some(PathBuf::from("/tmp/flotte")),
            ..Default::default()
        };
        let raw = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.backend, StorageBackend::Sqlite);
        assert_eq!(parsed.data_dir, config.data_dir);
    }

    #[test]
    fn partial_cost_toml_overrides_one_price() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "depot_electricity_eur_per_kwh = 0.18").unwrap();

        let params = load_cost_parameters(file.path()).unwrap();
        assert!((params.depot_electricity_eur_per_kwh - 0.18).abs() < 1e-9);
        assert!((params.diesel_price_eur_per_l - 1.73).abs() < 1e-9);
    }

    #[test]
    fn cost_toml_with_out_of_range_share_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "depot_charging_share = 2.0").unwrap();

        assert!(matches!(
            load_cost_parameters(file.path()).unwrap_err(),
            flotte_types::Error::InvalidInput(_)
        ));
    }
}
