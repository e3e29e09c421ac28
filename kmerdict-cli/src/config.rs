//! Configuration handling for the kmerdict CLI
//!
//! Loaded from `kmerdict.toml` (or `--config`), with CLI flags taking precedence.

use anyhow::{Context, Result};
use kmerdict_core::{DEFAULT_SSL, K};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliError;

const DEFAULT_CONFIG_FILE: &str = "kmerdict.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub minimizer: MinimizerConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimizerConfig {
    /// Window (super-string) length
    #[serde(default = "default_ssl")]
    pub ssl: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Distance between consecutive window starts
    #[serde(default = "default_stride")]
    pub stride: usize,

    /// Drop windows whose minimizer contains an N
    #[serde(default = "default_true")]
    pub skip_ambiguous: bool,
}

fn default_ssl() -> usize {
    DEFAULT_SSL
}

fn default_stride() -> usize {
    1
}

fn default_true() -> bool {
    true
}

impl Default for MinimizerConfig {
    fn default() -> Self {
        Self { ssl: default_ssl() }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            stride: default_stride(),
            skip_ambiguous: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minimizer: MinimizerConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.minimizer.ssl < K {
            return Err(CliError::config(format!(
                "minimizer.ssl must be at least {}, got {}",
                K, self.minimizer.ssl
            )));
        }
        if self.scan.stride == 0 {
            return Err(CliError::config("scan.stride must be positive"));
        }
        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.minimizer.ssl, DEFAULT_SSL);
        assert_eq!(config.scan.stride, 1);
        assert!(config.scan.skip_ambiguous);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.minimizer.ssl = 64;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded = Config::load(Some(temp_file.path()))?;

        assert_eq!(loaded.minimizer.ssl, 64);
        assert_eq!(loaded.scan.stride, config.scan.stride);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let config: Config = toml::from_str("[scan]\nstride = 5\n")?;
        assert_eq!(config.scan.stride, 5);
        assert!(config.scan.skip_ambiguous);
        assert_eq!(config.minimizer.ssl, DEFAULT_SSL);
        Ok(())
    }

    #[test]
    fn test_rejects_short_ssl() {
        let mut config = Config::default();
        config.minimizer.ssl = K - 1;
        assert!(matches!(config.validate(), Err(CliError::Config { .. })));
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[minimizer]"));
        assert!(example.contains("[scan]"));
        Ok(())
    }
}
