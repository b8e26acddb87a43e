//! On-disk tile cache.
//!
//! Tiles are stored verbatim under `<directory>/<provider>/<z>/<x>/<y>.png`.
//! There is no size limit, no TTL and no eviction: an entry lives until
//! someone removes it by hand.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use super::path::cache_path;
use super::types::{CacheError, CacheRead};
use crate::tile::TileKey;

/// Disambiguates temp files from concurrent writers in one process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Disk-backed tile store.
#[derive(Debug, Clone)]
pub struct TileCache {
    directory: PathBuf,
}

impl TileCache {
    /// Create a cache rooted at `directory`.
    ///
    /// Nothing is created on disk here; directories appear lazily on the
    /// first write below them.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Root directory of the cache.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the entry for `key`.
    pub fn path_for(&self, key: &TileKey) -> PathBuf {
        cache_path(&self.directory, key)
    }

    /// Look up a tile.
    ///
    /// A missing file is a `Miss`; any other read failure is `Corrupt`.
    /// Whatever bytes the file holds are a `Hit`, including none.
    pub async fn read(&self, key: &TileKey) -> CacheRead {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(data) => {
                trace!(key = %key, bytes = data.len(), "Tile cache hit");
                CacheRead::Hit(data)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => CacheRead::Miss,
            Err(source) => CacheRead::Corrupt(CacheError::Read { path, source }),
        }
    }

    /// Store a tile.
    ///
    /// Parent directories are created on demand; `create_dir_all` succeeds
    /// when a concurrent request created them first. The data goes to a
    /// unique temp file that is then renamed over the entry, so readers
    /// never see a partial tile and the last writer wins.
    pub async fn write(&self, key: &TileKey, data: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key);
        let write_error = |source| CacheError::Write {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(write_error)?;
        }

        let temp_path = temp_path_for(&path);
        if let Err(e) = tokio::fs::write(&temp_path, data).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(write_error(e));
        }
        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(write_error(e));
        }

        debug!(key = %key, bytes = data.len(), "Tile cached");
        Ok(())
    }

    /// Check whether an entry file exists, without reading it.
    pub async fn contains(&self, key: &TileKey) -> bool {
        tokio::fs::metadata(self.path_for(key))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = path
        .file_name()
        .map(|f| f.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.{}.tmp", std::process::id(), n));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn key() -> TileKey {
        TileKey::new("openstreetmap", 4, 8, 5)
    }

    #[tokio::test]
    async fn test_read_missing_is_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::new(temp_dir.path());

        assert!(matches!(cache.read(&key()).await, CacheRead::Miss));
        assert!(!cache.contains(&key()).await);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::new(temp_dir.path());

        cache.write(&key(), &[0x89, 0x50, 0x4E, 0x47]).await.unwrap();

        assert!(cache.contains(&key()).await);
        assert_eq!(
            cache.read(&key()).await.into_hit(),
            Some(vec![0x89, 0x50, 0x4E, 0x47])
        );
        assert!(temp_dir.path().join("openstreetmap/4/8/5.png").is_file());
    }

    #[tokio::test]
    async fn test_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::new(temp_dir.path());

        cache.write(&key(), &[1, 1]).await.unwrap();
        cache.write(&key(), &[2, 2, 2]).await.unwrap();

        assert_eq!(cache.read(&key()).await.into_hit(), Some(vec![2, 2, 2]));
    }

    #[tokio::test]
    async fn test_no_temp_files_remain() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::new(temp_dir.path());

        cache.write(&key(), &[1, 2, 3]).await.unwrap();

        let column = temp_dir.path().join("openstreetmap/4/8");
        let files: Vec<_> = std::fs::read_dir(&column)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(files.is_empty(), "Temp files should not remain");
    }

    #[tokio::test]
    async fn test_unreadable_entry_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::new(temp_dir.path());

        // A directory where the tile file should be cannot be read as bytes
        std::fs::create_dir_all(cache.path_for(&key())).unwrap();

        assert!(matches!(cache.read(&key()).await, CacheRead::Corrupt(_)));
        assert!(!cache.contains(&key()).await);
    }

    #[tokio::test]
    async fn test_empty_entry_is_hit() {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::new(temp_dir.path());
        cache.write(&key(), b"").await.unwrap();

        assert_eq!(cache.read(&key()).await.into_hit(), Some(Vec::new()));
        assert!(cache.contains(&key()).await);
    }

    #[tokio::test]
    async fn test_write_failure_reported() {
        let temp_dir = TempDir::new().unwrap();
        // Root is a regular file, so no directory can be created beneath it
        let root = temp_dir.path().join("not-a-dir");
        std::fs::write(&root, b"x").unwrap();
        let cache = TileCache::new(&root);

        let result = cache.write(&key(), &[1]).await;
        assert!(matches!(result, Err(CacheError::Write { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_sibling_writes() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Arc::new(TileCache::new(temp_dir.path()));

        let mut handles = Vec::new();
        for y in 0..16u32 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                let key = TileKey::new("terrain", 7, 64, y);
                cache.write(&key, &[y as u8 + 1]).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for y in 0..16u32 {
            let key = TileKey::new("terrain", 7, 64, y);
            assert_eq!(cache.read(&key).await.into_hit(), Some(vec![y as u8 + 1]));
        }
    }

    #[tokio::test]
    async fn test_concurrent_same_key_writes() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Arc::new(TileCache::new(temp_dir.path()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache.write(&key(), &[7, 7, 7]).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(cache.read(&key()).await.into_hit(), Some(vec![7, 7, 7]));
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let path = PathBuf::from("/cache/a/1/2/3.png");
        let a = temp_path_for(&path);
        let b = temp_path_for(&path);
        assert_ne!(a, b);
        assert_eq!(a.parent(), path.parent());
        assert!(a.to_string_lossy().ends_with(".tmp"));
    }
}
