//! Configuration for the flyover server.
//!
//! Settings are read from an INI file (default `~/.flyover/config.ini`).
//! A missing file means defaults; unknown sections are ignored.
//!
//! # Example
//!
//! ```ini
//! [server]
//! bind = 127.0.0.1:5000
//! max_upload_size = 16MB
//!
//! [cache]
//! directory = ~/.flyover/tile_cache
//!
//! [download]
//! timeout = 30
//!
//! [provider.hillshade]
//! url = https://hillshade.example.com/{z}/{x}/{y}.png
//! user_agent = GPX-3D-Flyover/1.0
//! header.Referer = https://example.com/
//! ```

mod file;
mod parser;
mod size;

pub use file::{
    config_directory, config_file_path, CacheSettings, ConfigFile, ConfigFileError,
    DownloadSettings, ServerSettings, DEFAULT_BIND, DEFAULT_CACHE_DIR_NAME,
    DEFAULT_MAX_UPLOAD_SIZE,
};
pub use size::{format_size, parse_size, SizeParseError};
