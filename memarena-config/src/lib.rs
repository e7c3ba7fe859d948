//! # memarena configuration
//!
//! Hierarchical configuration for the arena tools.
//!
//! ## Features
//! - **Layered sources**: defaults, YAML files, `MEMARENA_*` environment
//! - **Validation**: per-field rules via `validator`, plus cross-field checks

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

mod arena;
mod demo;
mod error;
mod telemetry;
mod validation;

pub use arena::{ArenaConfig, MAX_CAPACITY};
pub use demo::DemoConfig;
pub use error::ConfigError;
pub use telemetry::TelemetryConfig;

const BASE_FILE: &str = "config/memarena.yaml";
const ENV_PREFIX: &str = "MEMARENA_";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MemarenaConfig {
    /// Arena sizing.
    #[validate(nested)]
    pub arena: ArenaConfig,

    /// Demonstration scenario parameters.
    #[validate(nested)]
    pub demo: DemoConfig,

    /// Logging and metrics.
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl MemarenaConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/memarena.yaml`, if present
    /// 3. `config/<MEMARENA_ENV>.yaml`, if present
    /// 4. `MEMARENA_*` environment variables (`__` separates sections)
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(MemarenaConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        } else {
            debug!("{BASE_FILE} not found, using default configuration");
        }

        if let Ok(env) = std::env::var("MEMARENA_ENV") {
            let env_file = format!("config/{}.yaml", env);
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load configuration from a specific file, still honouring defaults and
    /// environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Self::extract(
            Figment::from(Serialized::defaults(MemarenaConfig::default()))
                .merge(Yaml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// Runs field validation and the cross-field checks. Use after changing
    /// values programmatically, e.g. from command-line overrides.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        self.check_consistency()?;
        Ok(self)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validated()
    }

    fn check_consistency(&self) -> Result<(), ConfigError> {
        let capacity = self.arena.capacity;
        if self.demo.first_batch > capacity {
            return Err(ConfigError::Inconsistent(format!(
                "demo.first_batch ({}) exceeds arena.capacity ({})",
                self.demo.first_batch, capacity
            )));
        }
        if self.demo.post_reset_batch > capacity {
            return Err(ConfigError::Inconsistent(format!(
                "demo.post_reset_batch ({}) exceeds arena.capacity ({})",
                self.demo.post_reset_batch, capacity
            )));
        }
        Ok(())
    }
}
