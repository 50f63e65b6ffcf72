//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] over an optional JSON file.  The path comes
//! from the `APPLESLICE_CONFIG` environment variable; with no path the
//! defaults are used.  Fields missing from the file keep their defaults.
//! Every loaded config passes [`GameConfig::validate`].

use std::path::PathBuf;

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::GameConfig;

pub const CONFIG_ENV: &str = "APPLESLICE_CONFIG";

pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Path from `APPLESLICE_CONFIG`, if set.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }
}

/// Parse and validate a JSON document.
pub fn parse(json: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
    config.validate()?;
    Ok(config)
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<GameConfig, ConfigError> {
        let Some(path) = &self.path else {
            info!("config: no {CONFIG_ENV}, using defaults");
            return Ok(GameConfig::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let config = parse(&text)?;
        info!("config: loaded {}", path.display());
        Ok(config)
    }
}
