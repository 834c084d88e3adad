//! # syl-config
//!
//! Layered configuration loading for syllabus using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SYLLABUS_*` prefix, `__` as separator)
//! 2. Project-level `.syllabus/config.toml`
//! 3. User-level `~/.config/syllabus/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SYLLABUS_RESOLVER__STRONG_MATCH_THRESHOLD` ->
//! `resolver.strong_match_threshold`, `SYLLABUS_OUTPUT__DIR` -> `output.dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use syl_config::SyllabusConfig;
//!
//! let config = SyllabusConfig::load_with_dotenv().expect("config");
//! println!("writing to {}", config.output.dir.display());
//! ```

mod directory;
mod error;
mod merge;
mod output;
mod resolver;

pub use directory::DirectoryConfig;
pub use error::ConfigError;
pub use merge::MergeConfig;
pub use output::OutputConfig;
pub use resolver::ResolverConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "SYLLABUS_";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SyllabusConfig {
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SyllabusConfig {
    /// Load and validate configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`]. A missing `.env` is not an error.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and callers can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path().filter(|path| path.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".syllabus/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check values that deserialize fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.merge.validate()?;
        self.resolver.validate()?;
        self.directory.validate()?;
        if self.output.dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("output.dir", "must not be empty"));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("syllabus").join("config.toml"))
    }
}
