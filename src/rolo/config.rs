use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, RoloError};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for rolo, stored in the data directory as `config.json`.
///
/// Both knobs are policy extras on top of the built-in field validation and
/// are off by default: `phone_prefix` additionally requires phones to start
/// with a fixed country code (e.g. "380"), `min_name_length` raises the
/// minimum contact-name length above the default of one character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoloConfig {
    #[serde(default)]
    pub phone_prefix: Option<String>,

    #[serde(default = "default_min_name_length")]
    pub min_name_length: usize,
}

fn default_min_name_length() -> usize {
    1
}

impl Default for RoloConfig {
    fn default() -> Self {
        Self {
            phone_prefix: None,
            min_name_length: default_min_name_length(),
        }
    }
}

impl RoloConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RoloError::Io)?;
        let config: RoloConfig = serde_json::from_str(&content).map_err(RoloError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RoloError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RoloError::Serialization)?;
        fs::write(config_path, content).map_err(RoloError::Io)?;
        Ok(())
    }

    /// Policy check applied before a phone is attached to a record.
    pub fn check_phone(&self, value: &str) -> Result<()> {
        if let Some(prefix) = &self.phone_prefix {
            if !value.starts_with(prefix.as_str()) {
                return Err(RoloError::PhoneBadPrefix(prefix.clone()));
            }
        }
        Ok(())
    }

    /// Policy check applied before a contact is created.
    pub fn check_name(&self, value: &str) -> Result<()> {
        if value.trim().chars().count() < self.min_name_length {
            return Err(RoloError::NameTooShort(self.min_name_length));
        }
        Ok(())
    }
}
