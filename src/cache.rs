//! Cache-backed fetching of API responses.
//!
//! One JSON file per cache key under the cache directory; the file's
//! modification time is the freshness signal.

use crate::api::http_get_json;
use crate::error::ApiResult;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Cached entries are served without a network call for one day.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Namespace prefix for cache files. `clear` only touches files carrying it.
const CACHE_PREFIX: &str = "opendota_";

/// Persistent cache for API responses
/// Stores one JSON file per cache key to avoid redundant API calls
#[derive(Debug)]
pub struct FetchCache {
    cache_dir: PathBuf,
}

impl Default for FetchCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchCache {
    /// Create a cache under the platform cache directory
    pub fn new() -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dotastat");
        Self::at(cache_dir)
    }

    /// Create a cache rooted at a specific directory
    pub fn at(cache_dir: impl Into<PathBuf>) -> Self {
        let cache_dir = cache_dir.into();
        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            log::warn!("Failed to create cache directory: {}", e);
        }
        log::info!("Cache directory: {:?}", cache_dir);
        Self { cache_dir }
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Generate a filename for a cache key
    fn filename(key: &str) -> String {
        format!("{}{}.json", CACHE_PREFIX, key)
    }

    /// Get the full path for a cached entry
    fn path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(Self::filename(key))
    }

    /// Age of the entry at `path`, or None if it does not exist
    fn entry_age(path: &Path) -> Option<Duration> {
        let modified = std::fs::metadata(path).ok()?.modified().ok()?;
        // An mtime in the future counts as just written
        Some(
            SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO),
        )
    }

    /// Fetch `url`, serving the entry for `key` from disk while it is
    /// younger than `max_age`
    ///
    /// On a miss the response body is parsed as JSON and persisted before
    /// being returned. Error responses are never persisted.
    pub fn fetch(&self, url: &str, key: &str, max_age: Duration) -> ApiResult<Value> {
        let path = self.path(key);

        if let Some(age) = Self::entry_age(&path) {
            if age < max_age {
                match std::fs::read_to_string(&path) {
                    Ok(content) => match serde_json::from_str(&content) {
                        Ok(value) => {
                            log::info!("Cache hit for {} (age {}s)", key, age.as_secs());
                            return Ok(value);
                        }
                        Err(e) => {
                            log::warn!("Corrupt cache entry {}, refetching: {}", key, e);
                        }
                    },
                    Err(e) => {
                        log::warn!("Failed to read cache entry {}, refetching: {}", key, e);
                    }
                }
            } else {
                log::info!(
                    "Cache entry {} is stale (age {}s), refetching",
                    key,
                    age.as_secs()
                );
            }
        }

        log::info!("Cache miss for {}, fetching {}", key, url);
        let value = http_get_json(url)?;
        self.store(&path, &value)?;
        Ok(value)
    }

    /// Persist a payload atomically: write a sibling tmp file, then rename
    fn store(&self, path: &Path, value: &Value) -> ApiResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string(value)?)?;
        std::fs::rename(&tmp, path)?;

        log::debug!("Cached entry {:?}", path.file_name().unwrap_or_default());
        Ok(())
    }

    /// Remove every cache entry carrying the namespace prefix
    ///
    /// Other files in the cache directory are left untouched. Not atomic
    /// across entries; a partial clear just leaves fewer candidates for
    /// the next run.
    pub fn clear(&self) -> ApiResult<String> {
        let mut removed = 0usize;
        for entry in std::fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(CACHE_PREFIX) && name.ends_with(".json") {
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        log::info!("Cleared {} cache entries", removed);
        Ok(format!("Removed {} cached entries.", removed))
    }
}
