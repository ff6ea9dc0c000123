//! Geocode resolution
//!
//! Maps coordinates to an INMET area geocode in three tiers:
//! 1. the persistent cache, keyed by coordinates rounded to two decimals
//! 2. the live area lookup, picking the closest area centroid
//! 3. the closest known capital
//!
//! Every answer from tiers 2 and 3 is written back to the cache.

pub mod areas;
pub mod known;

use crate::api::InmetApi;
use crate::cache::now_secs;
use crate::cache::store::{GeocodeCacheEntry, GeocodeStore};
use crate::constants::cache::GEOCODE_TTL_SECS;
use crate::coord::Coordinates;
use crate::error::Result;
use known::{nearest_known, KnownLocation, STATE_CAPITALS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Which tier produced a geocode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Cache,
    Live,
    Fallback,
}

/// A resolved geocode with its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub geocode: String,
    pub source: ResolutionSource,
}

/// Coordinates to geocode resolver
#[derive(Debug)]
pub struct GeocodeResolver {
    api: InmetApi,
    store: GeocodeStore,
    known: &'static [KnownLocation],
    live_lookup: bool,
    ttl: Duration,
}

impl GeocodeResolver {
    /// Resolver with live lookup enabled, the capitals table and a 2 day TTL
    pub fn new(api: InmetApi, store: GeocodeStore) -> Self {
        Self {
            api,
            store,
            known: STATE_CAPITALS,
            live_lookup: true,
            ttl: Duration::from_secs(GEOCODE_TTL_SECS),
        }
    }

    /// Enable or skip the live area lookup
    pub fn with_live_lookup(mut self, enabled: bool) -> Self {
        self.live_lookup = enabled;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Replace the fallback table
    pub fn with_known_locations(mut self, known: &'static [KnownLocation]) -> Self {
        self.known = known;
        self
    }

    pub fn live_lookup(&self) -> bool {
        self.live_lookup
    }

    pub fn store(&self) -> &GeocodeStore {
        &self.store
    }

    /// Geocode for the coordinates, or `None` when nothing can answer
    pub async fn resolve(&self, lat: f64, lon: f64) -> Option<String> {
        self.resolve_detailed(lat, lon).await.map(|r| r.geocode)
    }

    /// Like [`resolve`](Self::resolve), also reporting which tier answered
    pub async fn resolve_detailed(&self, lat: f64, lon: f64) -> Option<Resolution> {
        let coords = Coordinates::new(lat, lon);
        if let Err(e) = coords.validate() {
            warn!("Refusing to resolve geocode: {}", e);
            return None;
        }

        let key = coords.cache_key();
        if let Some(entry) = self
            .store
            .get_valid(&key, self.ttl.as_secs_f64(), now_secs())
            .await
        {
            debug!("Using cached geocode {} for {}", entry.geocode, coords);
            return Some(Resolution {
                geocode: entry.geocode,
                source: ResolutionSource::Cache,
            });
        }

        if self.live_lookup {
            match self.lookup_live(coords).await {
                Ok((geocode, distance)) => {
                    info!(
                        "Found geocode {} from API for {} ({:.2} km)",
                        geocode, coords, distance
                    );
                    let entry = GeocodeCacheEntry::live(geocode.clone(), lat, lon, now_secs());
                    self.store.insert(key, entry).await;
                    return Some(Resolution {
                        geocode,
                        source: ResolutionSource::Live,
                    });
                }
                Err(e) => {
                    warn!(
                        "Area lookup failed for {}: {}, falling back to known locations",
                        coords, e
                    );
                }
            }
        }

        let Some(location) = nearest_known(self.known, coords) else {
            warn!("No known locations to fall back on for {}", coords);
            return None;
        };

        info!(
            "Using fallback geocode {} ({}) for {}",
            location.geocode, location.name, coords
        );
        let entry = GeocodeCacheEntry::fallback(location.geocode.to_string(), lat, lon, now_secs());
        self.store.insert(key, entry).await;

        Some(Resolution {
            geocode: location.geocode.to_string(),
            source: ResolutionSource::Fallback,
        })
    }

    async fn lookup_live(&self, coords: Coordinates) -> Result<(String, f64)> {
        let payload = self.api.nearby_areas().await?;
        areas::nearest_area(&payload, coords)
    }
}
