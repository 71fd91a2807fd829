//! Configuration management for vfswalk

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default sled page cache size for the overlay database: 64MB
pub const DEFAULT_OVERLAY_CACHE_SIZE: u64 = 64 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Overlay store configuration
    pub overlay: OverlayConfig,

    /// Path to the data directory
    pub data_dir: PathBuf,
}

/// Overlay store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Directory holding the overlay database
    pub path: PathBuf,

    /// Page cache size for the overlay database, in bytes
    pub cache_capacity: u64,

    /// Flush the database after every record write
    pub flush_on_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from(".").join("vfswalk");

        Config {
            overlay: OverlayConfig {
                path: data_dir.join("overlay"),
                cache_capacity: DEFAULT_OVERLAY_CACHE_SIZE,
                flush_on_write: false,
            },
            data_dir,
        }
    }
}

impl Config {
    /// Create a configuration rooted at the given data directory
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Config {
            overlay: OverlayConfig {
                path: data_dir.join("overlay"),
                cache_capacity: DEFAULT_OVERLAY_CACHE_SIZE,
                flush_on_write: false,
            },
            data_dir,
        }
    }

    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.overlay.path.as_os_str().is_empty() {
            return Err(Error::Config("overlay path must not be empty".to_string()));
        }

        if self.overlay.cache_capacity == 0 {
            return Err(Error::Config(
                "overlay cache capacity must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
