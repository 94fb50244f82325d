//! # wicket-config
//!
//! Layered configuration loading for Wicket using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WICKET_*` prefix, `__` as separator)
//! 2. The bare `GEMINI_API_KEY` variable, mapped to `gemini.api_key`
//! 3. Project-level `.wicket/config.toml`
//! 4. User-level `~/.config/wicket/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WICKET_GEMINI__MODEL` -> `gemini.model`,
//! `WICKET_LIMITS__DAILY_LIMIT` -> `limits.daily_limit`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use wicket_config::WicketConfig;
//!
//! let config = WicketConfig::load_with_dotenv().expect("config");
//!
//! if config.gemini.is_configured() {
//!     println!("Model: {}", config.gemini.model);
//! }
//! ```

mod database;
mod error;
mod gemini;
mod limits;
mod publish;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use limits::LimitsConfig;
pub use publish::PublishConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable accepted without the `WICKET_` prefix.
pub const LEGACY_API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WicketConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

impl WicketConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse and
    /// [`ConfigError::InvalidValue`] when a limit is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory
    /// or one of its parents.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is fine; the environment may already be set.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".wicket/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(
                Env::raw()
                    .only(&[LEGACY_API_KEY_VAR])
                    .map(|_| "gemini.api_key".into()),
            )
            .merge(Env::prefixed("WICKET_").split("__"))
    }

    /// Reject values that would make the service unusable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("limits.daily_limit", self.limits.daily_limit),
            ("limits.max_retries", self.limits.max_retries),
            ("limits.max_deep_steps", self.limits.max_deep_steps),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        if self.gemini.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gemini.request_timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wicket").join("config.toml"))
    }
}
