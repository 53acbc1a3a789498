//! Configuration management.
//!
//! Hyperparameters can be built in code with [`ConfigBuilder`], read from a
//! JSON or TOML file, taken from `XGB_*` environment variables, or parsed
//! from a string map with [`utils::parse_config_from_map`].

pub mod core;

pub use self::core::{Config, ConfigBuilder};

use crate::core::error::Result;

/// Utility functions for configuration management
pub mod utils {
    use super::*;
    use std::collections::HashMap;

    /// Parse configuration from key-value pairs, then validate it.
    pub fn parse_config_from_map(map: &HashMap<String, String>) -> Result<Config> {
        let mut config = Config::default();

        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        for key in keys {
            config.set_parameter(key, &map[key])?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Convert configuration to key-value pairs
    pub fn config_to_map(config: &Config) -> HashMap<String, String> {
        config.as_parameter_map()
    }
}
