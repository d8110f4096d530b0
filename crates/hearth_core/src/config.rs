//! # Engine Configuration
//!
//! Run-loop settings, loaded once at startup from TOML.
//!
//! ```toml
//! # Ticks per second. Omit to run ticks back to back.
//! tick_rate = 60
//! # Stop after this many ticks. Omit to run until a stop is requested.
//! max_ticks = 10000
//! # Bound the control channel. Omit for an unbounded channel.
//! control_capacity = 64
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EcsError, EcsResult};

/// Configuration for [`Engine`](crate::Engine).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Target ticks per second for [`Engine::run`](crate::Engine::run).
    pub tick_rate: Option<u32>,
    /// Upper bound on ticks executed by one call to `run`.
    pub max_ticks: Option<u64>,
    /// Capacity of the control channel.
    pub control_capacity: Option<usize>,
}

impl EngineConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if the text is not valid TOML,
    /// names unknown keys, or fails [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> EcsResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| EcsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ConfigIo`] if the file cannot be read, and the
    /// errors of [`from_toml_str`](Self::from_toml_str) otherwise.
    pub fn from_toml_file(path: impl AsRef<Path>) -> EcsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> EcsResult<String> {
        toml::to_string(self).map_err(|e| EcsError::InvalidConfig(e.to_string()))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] for a zero tick rate or a zero
    /// control channel capacity.
    pub fn validate(&self) -> EcsResult<()> {
        if self.tick_rate == Some(0) {
            return Err(EcsError::InvalidConfig(
                "tick_rate must be greater than zero".into(),
            ));
        }
        if self.control_capacity == Some(0) {
            return Err(EcsError::InvalidConfig(
                "control_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
