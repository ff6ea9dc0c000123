//! Weather fetch layer
//!
//! Fetches current conditions, forecasts and nearest-station payloads. A
//! failed fetch is answered with the last successful payload for the same
//! key; without one the answer is `None`.

use crate::api::InmetApi;
use crate::cache::{LastKnown, TtlCache};
use crate::constants::cache::STATION_TTL_SECS;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geocode::GeocodeResolver;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Payload fetcher with per-key fallback caches
#[derive(Debug)]
pub struct WeatherFetcher {
    api: InmetApi,
    current: LastKnown<String, Value>,
    forecasts: LastKnown<String, Value>,
    /// Fresh station payloads by coordinate key
    stations: TtlCache<String, Value>,
    /// Last successful station payload by coordinate key
    last_stations: LastKnown<String, Value>,
}

impl WeatherFetcher {
    pub fn new(api: InmetApi) -> Self {
        Self::with_station_ttl(api, Duration::from_secs(STATION_TTL_SECS))
    }

    pub fn with_station_ttl(api: InmetApi, station_ttl: Duration) -> Self {
        Self {
            api,
            current: LastKnown::new("current weather"),
            forecasts: LastKnown::new("forecast"),
            stations: TtlCache::new(station_ttl),
            last_stations: LastKnown::new("station"),
        }
    }

    /// Current conditions for the area
    pub async fn current_weather(&self, geocode: &str) -> Option<Value> {
        let outcome = logged(self.api.station(geocode).await, "current weather", geocode);
        self.current.settle(geocode.to_string(), outcome).await
    }

    /// Forecast for the area
    pub async fn forecast(&self, geocode: &str) -> Option<Value> {
        let outcome = logged(self.api.forecast(geocode).await, "forecast", geocode);
        self.forecasts.settle(geocode.to_string(), outcome).await
    }

    /// Nearest station payload for the coordinates
    ///
    /// A fresh cached payload answers without any network call. Otherwise the
    /// geocode is resolved and the station fetched; when either step fails the
    /// last successful payload for these coordinates answers.
    pub async fn nearest_station(
        &self,
        resolver: &GeocodeResolver,
        lat: f64,
        lon: f64,
    ) -> Option<Value> {
        let coords = Coordinates::new(lat, lon);
        if let Err(e) = coords.validate() {
            warn!("Refusing station lookup: {}", e);
            return None;
        }

        let key = coords.cache_key();
        if let Some(payload) = self.stations.get_fresh(&key).await {
            debug!("Using cached station data for {}", coords);
            return Some(payload);
        }

        let Some(geocode) = resolver.resolve(lat, lon).await else {
            let previous = self.last_stations.get(&key).await;
            if previous.is_some() {
                warn!("No geocode for {}, using last successful station data", coords);
            }
            return previous;
        };

        match logged(self.api.station(&geocode).await, "station", &geocode) {
            Ok(payload) => {
                self.stations.insert(key.clone(), payload.clone()).await;
                self.last_stations.record(key, payload.clone()).await;
                debug!("Cached station data for {}", coords);
                Some(payload)
            }
            Err(e) => self.last_stations.settle(key, Err(e)).await,
        }
    }

    #[cfg(test)]
    pub(crate) fn station_cache(&self) -> &TtlCache<String, Value> {
        &self.stations
    }
}

fn logged(outcome: Result<Value>, what: &str, geocode: &str) -> Result<Value> {
    if let Err(e) = &outcome {
        error!("Error fetching {} for {}: {}", what, geocode, e);
    }
    outcome
}
