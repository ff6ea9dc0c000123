//! Persistent geocode cache
//!
//! A single JSON document mapping cache keys to [`GeocodeCacheEntry`]. It is
//! read once when the store opens and rewritten whole on every insert.

use crate::constants::cache::{FALLBACK_SOURCE, GEOCODE_CACHE_FILE};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// One resolved geocode with the coordinates that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCacheEntry {
    pub geocode: String,
    /// Epoch seconds at resolution time
    pub timestamp: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// `"fallback"` when the static table answered; absent for live answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl GeocodeCacheEntry {
    pub fn live(geocode: String, latitude: f64, longitude: f64, timestamp: f64) -> Self {
        Self {
            geocode,
            timestamp,
            latitude,
            longitude,
            source: None,
        }
    }

    pub fn fallback(geocode: String, latitude: f64, longitude: f64, timestamp: f64) -> Self {
        Self {
            source: Some(FALLBACK_SOURCE.to_string()),
            ..Self::live(geocode, latitude, longitude, timestamp)
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source.as_deref() == Some(FALLBACK_SOURCE)
    }

    /// Trusted while younger than `ttl_secs`
    pub fn is_valid(&self, ttl_secs: f64, now: f64) -> bool {
        now - self.timestamp < ttl_secs
    }
}

/// Geocode map backed by an optional file
#[derive(Debug)]
pub struct GeocodeStore {
    path: Option<PathBuf>,
    entries: Mutex<HashMap<String, GeocodeCacheEntry>>,
    /// Serializes file writes so snapshots land in insert order
    write_lock: Mutex<()>,
}

impl GeocodeStore {
    /// Open the store in `cache_dir`, loading any existing cache file
    pub fn open(cache_dir: &Path) -> Self {
        Self::with_path(cache_dir.join(GEOCODE_CACHE_FILE))
    }

    /// Open the store at an explicit file path
    pub fn with_path(path: PathBuf) -> Self {
        let entries = load_from(&path);
        Self {
            path: Some(path),
            entries: Mutex::new(entries),
            write_lock: Mutex::new(()),
        }
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Entry for the key, valid or not
    pub async fn get(&self, key: &str) -> Option<GeocodeCacheEntry> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Entry for the key if it is still within `ttl_secs`
    pub async fn get_valid(&self, key: &str, ttl_secs: f64, now: f64) -> Option<GeocodeCacheEntry> {
        self.get(key)
            .await
            .filter(|entry| entry.is_valid(ttl_secs, now))
    }

    /// Insert an entry and persist the whole map
    ///
    /// The map is serialized under its lock; the file write runs on the
    /// blocking pool after the lock is released. Persistence failures are
    /// logged and swallowed; the in-memory map keeps the entry either way.
    pub async fn insert(&self, key: String, entry: GeocodeCacheEntry) {
        let mut entries = self.entries.lock().await;
        entries.insert(key, entry);

        let Some(path) = self.path.clone() else {
            return;
        };
        let content = match serde_json::to_string_pretty(&*entries) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to serialize geocode cache: {}", e);
                return;
            }
        };

        // Held across the release so snapshots reach disk in insert order
        let _writing = self.write_lock.lock().await;
        drop(entries);

        let target = path.clone();
        match tokio::task::spawn_blocking(move || save_to(&target, &content)).await {
            Ok(Ok(())) => debug!("Saved geocode cache to {}", path.display()),
            Ok(Err(e)) => warn!("Failed to save geocode cache to {}: {}", path.display(), e),
            Err(e) => warn!("Geocode cache writer for {} failed: {}", path.display(), e),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

/// Read a cache file; missing or corrupt files yield an empty map
pub fn load_from(path: &Path) -> HashMap<String, GeocodeCacheEntry> {
    if !path.exists() {
        return HashMap::new();
    }

    let parsed: Result<HashMap<String, GeocodeCacheEntry>> = fs::read_to_string(path)
        .map_err(crate::error::Error::from)
        .and_then(|content| Ok(serde_json::from_str(&content)?));

    match parsed {
        Ok(entries) => {
            debug!("Loaded geocode cache from {}", path.display());
            entries
        }
        Err(e) => {
            warn!("Failed to load geocode cache from {}: {}", path.display(), e);
            HashMap::new()
        }
    }
}

/// Write serialized content to a sibling temp file, then rename over the target
fn save_to(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
