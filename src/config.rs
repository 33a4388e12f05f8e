//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! dispatcher-config.toml file. It decides where the schedule is persisted,
//! whether changes are saved automatically, and how wide the driver column is.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, resolved against the working directory
pub const CONFIG_FILE: &str = "dispatcher-config.toml";

/// Application configuration loaded from dispatcher-config.toml
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Schedule file settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Schedule table settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where and when the rotation is written to disk
#[derive(Debug, Deserialize, Serialize)]
pub struct StorageConfig {
    /// CSV file holding the rotation
    pub schedule_file: PathBuf,
    /// Save after every successful register or rotate
    pub autosave: bool,
}

/// Schedule table layout
#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Width of the driver column in characters
    pub driver_width: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            schedule_file: PathBuf::from("ambulance_schedule.csv"),
            autosave: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { driver_width: 20 }
    }
}

impl Config {
    /// Load configuration from dispatcher-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    eprintln!(
                        "Loaded configuration: schedule file {}",
                        config.storage.schedule_file.display()
                    );
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!("Info: No config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        eprintln!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.storage.schedule_file,
            PathBuf::from("ambulance_schedule.csv")
        );
        assert!(config.storage.autosave);
        assert_eq!(config.display.driver_width, 20);
    }

    #[test]
    fn test_config_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.storage.schedule_file = PathBuf::from("/var/lib/dispatch/rotation.csv");
        config.storage.autosave = false;
        config.save(file.path()).unwrap();

        let parsed = Config::load_from_path(file.path());
        assert_eq!(parsed.storage.schedule_file, config.storage.schedule_file);
        assert!(!parsed.storage.autosave);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[display]\ndriver_width = 32\n").unwrap();
        assert_eq!(parsed.display.driver_width, 32);
        assert!(parsed.storage.autosave);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.display.driver_width, 20);
    }

    #[test]
    fn test_load_invalid_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "storage = [not toml").unwrap();
        let config = Config::load_from_path(file.path());
        assert!(config.storage.autosave);
    }
}
