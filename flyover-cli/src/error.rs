//! CLI error handling with user-friendly messages.
//!
//! Every command returns [`CliError`]; `main` prints it and exits with code 1.

use std::fmt;
use std::io;
use std::process;

use flyover::config::ConfigFileError;
use flyover::provider::TransportError;
use flyover::server::ServerError;
use flyover::tile::TileError;
use flyover::track::TrackError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// Failed to start the async runtime
    Runtime(io::Error),
    /// Failed to create the HTTP client
    Client(TransportError),
    /// HTTP server failed to start or stopped with an error
    Server(ServerError),
    /// Tile could not be retrieved
    Tile(TileError),
    /// Track file could not be parsed
    Track(TrackError),
    /// Failed to read an input file
    FileRead { path: String, error: io::Error },
    /// Failed to write an output file
    FileWrite { path: String, error: io::Error },
    /// Failed to render JSON output
    Output(serde_json::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Server(ServerError::Bind { .. }) => {
                eprintln!();
                eprintln!("Another process may be using the port.");
                eprintln!("Pick a different address with --bind or [server] bind in config.ini.");
            }
            CliError::Tile(TileError::UnknownProvider(_)) => {
                eprintln!();
                eprintln!("Add a [provider.<name>] section to config.ini to register it.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Client(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Server(e) => write!(f, "{}", e),
            CliError::Tile(TileError::UpstreamStatus(status)) => {
                write!(f, "Provider responded with HTTP {}", status)
            }
            CliError::Tile(e) => write!(f, "Failed to fetch tile: {}", e),
            CliError::Track(e) => write!(f, "{}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::Output(e) => write!(f, "Failed to render output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Client(e) => Some(e),
            CliError::Server(e) => Some(e),
            CliError::Tile(e) => Some(e),
            CliError::Track(e) => Some(e),
            CliError::FileRead { error, .. } | CliError::FileWrite { error, .. } => Some(error),
            CliError::Output(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<ServerError> for CliError {
    fn from(e: ServerError) -> Self {
        CliError::Server(e)
    }
}

impl From<TileError> for CliError {
    fn from(e: TileError) -> Self {
        CliError::Tile(e)
    }
}

impl From<TrackError> for CliError {
    fn from(e: TrackError) -> Self {
        CliError::Track(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CliError::Tile(TileError::UpstreamStatus(404)).to_string(),
            "Provider responded with HTTP 404"
        );
        assert_eq!(
            CliError::Tile(TileError::UnknownProvider("x".to_string())).to_string(),
            "Failed to fetch tile: Unknown tile provider"
        );
        assert_eq!(
            CliError::Track(TrackError::Empty).to_string(),
            "No track points found in GPX file"
        );
    }

    #[test]
    fn test_file_error_names_path() {
        let err = CliError::FileRead {
            path: "ride.gpx".to_string(),
            error: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("'ride.gpx'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
