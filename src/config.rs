use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    channel::{DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT_MS},
    error::ConfigError,
};

use self::key_map::KeyMap;

pub mod key_map;

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    #[serde(default)]
    pub keys: RawKeys,

    #[serde(default)]
    pub serial: SerialConfig,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RawKeys {
    #[serde(default)]
    pub trigger: Vec<String>,
    pub quit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl SerialConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl TryFrom<&str> for RawConfig {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let config = toml::from_str(value)?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub key_map: KeyMap,
    pub serial: SerialConfig,
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            key_map: KeyMap::try_from(&raw.keys)?,
            serial: raw.serial,
        })
    }
}

impl Config {
    /// # Errors
    ///
    /// Returns an error if the string is not valid TOML, contains unknown
    /// fields, or describes an invalid key map.
    pub fn read_from_string(value: &str) -> Result<Self, ConfigError> {
        RawConfig::try_from(value).and_then(Self::try_from)
    }
}
