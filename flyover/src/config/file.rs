//! Configuration file handling for ~/.flyover/config.ini.
//!
//! Settings structs and defaults live here; INI key mapping lives in
//! [`super::parser`].

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::provider::{ProviderRegistry, TileProviderConfig, DEFAULT_FETCH_TIMEOUT_SECS};

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Default upload size limit (16 MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Name of the tile cache directory under the config directory.
pub const DEFAULT_CACHE_DIR_NAME: &str = "tile_cache";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Provider section is incomplete
    #[error("Invalid configuration: [{section}] - {reason}")]
    InvalidSection { section: String, reason: String },
}

/// `[server]` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    pub max_upload_size: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

/// `[cache]` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    pub directory: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            directory: config_directory().join(DEFAULT_CACHE_DIR_NAME),
        }
    }
}

/// `[download]` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Per-fetch timeout in seconds.
    pub timeout: u64,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

/// Everything read from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub server: ServerSettings,
    pub cache: CacheSettings,
    pub download: DownloadSettings,
    /// `[provider.<name>]` sections, in file order.
    pub providers: Vec<(String, TileProviderConfig)>,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.flyover/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn from_ini_str(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| ConfigFileError::ReadError(ini::Error::Parse(e)))?;
        super::parser::parse_ini(&ini)
    }

    /// Built-in providers with this file's provider sections layered on top.
    pub fn provider_registry(&self) -> ProviderRegistry {
        let mut registry = ProviderRegistry::builtin();
        for (name, config) in &self.providers {
            // Names were validated while parsing.
            let _ = registry.insert(name.clone(), config.clone());
        }
        registry
    }
}

/// Get the path to the config directory (~/.flyover).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".flyover")
}

/// Get the path to the config file (~/.flyover/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
