//! # krit-config
//!
//! Layered configuration loading for krit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KRIT_*` prefix, `__` as separator)
//! 2. Working-directory `.krit/config.toml`
//! 3. User-level `~/.config/krit/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KRIT_PATHS__PROJECTS_ROOT` -> `paths.projects_root`,
//! `KRIT_GENERAL__SYNC_ACTOR` -> `general.sync_actor`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use krit_config::KritConfig;
//!
//! let config = KritConfig::load_with_dotenv().expect("config");
//! println!("projects live in {}", config.paths.projects_root);
//! ```

mod error;
mod general;
mod paths;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use paths::PathsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KritConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl KritConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".krit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("KRIT_").split("__"))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paths.validate()?;
        for (field, value) in [
            ("general.sync_actor", &self.general.sync_actor),
            ("general.default_actor", &self.general.default_actor),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("krit").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = KritConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.sync_actor, "system");
    }

    #[test]
    fn empty_actor_is_rejected() {
        let mut config = KritConfig::default();
        config.general.default_actor = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_actor"));
    }
}
