use std::env;

use thiserror::Error;

pub const DEFAULT_SERVER_NAME: &str = "custom_tools";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2025-06-18";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_name: String,
    pub server_version: String,
    pub protocol_version: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is set but empty")]
    Empty(&'static str),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source; unset keys fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &'static str, default: String| -> Result<String, ConfigError> {
            match lookup(key).map(|value| value.trim().to_string()) {
                None => Ok(default),
                Some(value) if value.is_empty() => Err(ConfigError::Empty(key)),
                Some(value) => Ok(value),
            }
        };

        Ok(Self {
            server_name: read("MCP_SERVER_NAME", defaults.server_name)?,
            server_version: read("MCP_SERVER_VERSION", defaults.server_version)?,
            protocol_version: read("MCP_PROTOCOL_VERSION", defaults.protocol_version)?,
        })
    }
}
