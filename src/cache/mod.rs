//! Cache policies
//!
//! Two in-memory policies shared by the resolver and the fetch layer:
//! - [`LastKnown`]: authoritative answer when the live call works, otherwise
//!   the latest success for the key; never expires
//! - [`TtlCache`]: entries trusted only while younger than a fixed TTL
//!
//! The persistent geocode map lives in [`store`].

pub mod store;

use crate::error::Result;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Current time as fractional epoch seconds
pub fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Authoritative-or-last-known cache
///
/// Holds exactly one value per key: the latest successful one.
#[derive(Debug)]
pub struct LastKnown<K, V> {
    name: &'static str,
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> LastKnown<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Clone,
{
    /// Create an empty cache; `name` only appears in logs
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Record a successful value, replacing any previous one
    pub async fn record(&self, key: K, value: V) {
        self.entries.write().await.insert(key, value);
    }

    /// Latest successful value for the key
    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.read().await.get(key).cloned()
    }

    /// Settle a live outcome against the cache
    ///
    /// `Ok` is authoritative: it is recorded and returned. `Err` is answered
    /// with the last known value, if any.
    pub async fn settle(&self, key: K, outcome: Result<V>) -> Option<V> {
        match outcome {
            Ok(value) => {
                self.record(key, value.clone()).await;
                Some(value)
            }
            Err(e) => {
                let previous = self.get(&key).await;
                if previous.is_some() {
                    warn!("Using last successful {} data for {} ({})", self.name, key, e);
                } else {
                    debug!("No previous {} data for {} ({})", self.name, key, e);
                }
                previous
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// A value stamped with its insertion time (epoch seconds)
#[derive(Debug, Clone)]
struct Stamped<V> {
    value: V,
    timestamp: f64,
}

/// TTL-bounded cache
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, Stamped<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a value stamped with the current time
    pub async fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, now_secs()).await;
    }

    /// Insert a value with an explicit timestamp
    pub async fn insert_at(&self, key: K, value: V, timestamp: f64) {
        self.entries
            .write()
            .await
            .insert(key, Stamped { value, timestamp });
    }

    /// Value for the key if it is still fresh now
    pub async fn get_fresh(&self, key: &K) -> Option<V> {
        self.get_fresh_at(key, now_secs()).await
    }

    /// Value for the key if `now - timestamp < ttl`
    ///
    /// Expired entries stay in the map; they are overwritten by the next insert.
    pub async fn get_fresh_at(&self, key: &K, now: f64) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if now - entry.timestamp < self.ttl.as_secs_f64() {
            debug!("Fresh cache entry for {}", key);
            Some(entry.value.clone())
        } else {
            debug!("Cache entry for {} expired", key);
            None
        }
    }

    /// Shift an entry's timestamp into the past
    #[cfg(test)]
    pub(crate) async fn backdate(&self, key: &K, secs: f64) {
        if let Some(entry) = self.entries.write().await.get_mut(key) {
            entry.timestamp -= secs;
        }
    }
}
