//! Cache manager for persisting daily readings to disk

use chrono::NaiveDate;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::data::Reading;

/// Manages reading and writing cached readings to disk
///
/// The cache stores one JSON array per calendar date in an XDG-compliant
/// cache directory (`~/.cache/lectio/` on Linux). The key is derived from
/// the date alone, truncated to day granularity, so the same calendar day
/// always maps to the same file regardless of time-of-day. There is no
/// expiry timestamp; `save` overwrites whatever entry exists for that date.
#[derive(Debug, Clone)]
pub struct ReadingCache {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl ReadingCache {
    /// Creates a new ReadingCache using an XDG-compliant cache directory
    ///
    /// Uses `~/.cache/lectio/` on Linux, or equivalent XDG path on other
    /// platforms. Returns `None` if the cache directory cannot be
    /// determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "lectio")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new ReadingCache with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the cache key for a date, e.g. "readings-20250127"
    fn cache_key(date: NaiveDate) -> String {
        format!("readings-{}", date.format("%Y%m%d"))
    }

    /// Returns the path to the cache file for the given date
    fn cache_path(&self, date: NaiveDate) -> PathBuf {
        self.cache_dir.join(format!("{}.json", Self::cache_key(date)))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes a day's readings to the cache, replacing any existing entry
    ///
    /// An empty slice is persisted like any other value; whether an empty
    /// day is worth caching is the caller's decision.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn save(&self, date: NaiveDate, readings: &[Reading]) -> std::io::Result<()> {
        self.ensure_dir()?;

        let json = serde_json::to_string_pretty(readings)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(date), json)
    }

    /// Reads a day's readings from the cache
    ///
    /// Returns `None` if no entry exists for the date or the stored entry
    /// cannot be decoded. A decode failure (corrupt or partial write) is
    /// logged and treated as a miss so the caller re-fetches instead of
    /// surfacing an error.
    pub fn load(&self, date: NaiveDate) -> Option<Vec<Reading>> {
        let path = self.cache_path(date);
        let content = fs::read_to_string(path).ok()?;

        match serde_json::from_str(&content) {
            Ok(readings) => Some(readings),
            Err(e) => {
                warn!(%date, error = %e, "discarding undecodable cache entry");
                None
            }
        }
    }
}
