//! Configuration loading utilities

use std::env;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::Config;
use engraph_common::Result as EngraphResult;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),
}

impl From<ConfigError> for engraph_common::EngraphError {
    fn from(err: ConfigError) -> Self {
        engraph_common::EngraphError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config);
        config.validate_all()?;

        debug!(path = %path.as_ref().display(), "loaded configuration file");
        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// `ENGRAPH_CONFIG_PATH` wins, then `engraph.yaml` / `engraph.yml` in the
    /// working directory. Week groups are required; there are no built-in
    /// report folders to fall back to.
    pub fn load() -> EngraphResult<Config> {
        let config = if let Ok(config_path) = env::var("ENGRAPH_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("engraph.yaml").exists() {
            Self::load_config("engraph.yaml")?
        } else if Path::new("engraph.yml").exists() {
            Self::load_config("engraph.yml")?
        } else {
            return Err(ConfigError::MissingConfig(
                "no configuration file found (set ENGRAPH_CONFIG_PATH or create engraph.yaml)"
                    .to_string(),
            )
            .into());
        };

        info!(
            groups = config.weeks.len(),
            output = %config.output.directory.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EngraphResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) {
        if let Ok(dir) = env::var("ENGRAPH_OUTPUT_DIR") {
            config.output.directory = dir.into();
        }

        if let Ok(level) = env::var("ENGRAPH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(export) = env::var("ENGRAPH_EXPORT_TABLES") {
            config.output.export_tables = matches!(export.as_str(), "1" | "true" | "yes");
        }
    }
}
