//! Cache result and error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the on-disk tile cache.
///
/// These never reach a client: reads degrade to a fetch and writes are
/// logged and dropped.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading an existing entry failed.
    #[error("Failed to read cached tile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an entry (or its directories) failed.
    #[error("Failed to write cached tile {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a cache lookup.
#[derive(Debug)]
pub enum CacheRead {
    /// Entry present and readable.
    Hit(Vec<u8>),
    /// No entry at this key.
    Miss,
    /// An entry exists but could not be read. Callers treat this like `Miss`.
    Corrupt(CacheError),
}

impl CacheRead {
    /// Returns the cached bytes on a hit.
    pub fn into_hit(self) -> Option<Vec<u8>> {
        match self {
            CacheRead::Hit(data) => Some(data),
            CacheRead::Miss | CacheRead::Corrupt(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_hit() {
        assert_eq!(CacheRead::Hit(vec![1, 2]).into_hit(), Some(vec![1, 2]));
        assert_eq!(CacheRead::Miss.into_hit(), None);

        let corrupt = CacheRead::Corrupt(CacheError::Read {
            path: PathBuf::from("/cache/a/1/2/3.png"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "truncated"),
        });
        assert_eq!(corrupt.into_hit(), None);
    }

    #[test]
    fn test_cache_error_display_includes_path() {
        let err = CacheError::Write {
            path: PathBuf::from("/cache/terrain/1/2/3.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/cache/terrain/1/2/3.png"));
        assert!(message.contains("denied"));
    }
}
