//! Client facade
//!
//! [`InmetClient`] bundles one resolver and one fetch layer behind the five
//! operations a host integration needs. Share it through `Arc`; every
//! operation takes `&self`.

use crate::api::InmetApi;
use crate::boundary::{self, TerritoryCheck};
use crate::cache::store::GeocodeStore;
use crate::config::Config;
use crate::constants::api::USER_AGENT;
use crate::error::Result;
use crate::geocode::{GeocodeResolver, Resolution};
use crate::weather::WeatherFetcher;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct InmetClient {
    resolver: GeocodeResolver,
    weather: WeatherFetcher,
}

impl InmetClient {
    /// Client with default TTLs, persisting the geocode cache in `store`
    pub fn new(api: InmetApi, store: GeocodeStore) -> Self {
        Self {
            resolver: GeocodeResolver::new(api.clone(), store),
            weather: WeatherFetcher::new(api),
        }
    }

    /// Assemble a client from preconfigured parts
    pub fn from_parts(resolver: GeocodeResolver, weather: WeatherFetcher) -> Self {
        Self { resolver, weather }
    }

    /// Build a client from the user configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let api = InmetApi::with_client(
            http,
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        );

        let cache_dir = config.cache_dir()?;
        debug!("Using geocode cache in {}", cache_dir.display());

        let resolver = GeocodeResolver::new(api.clone(), GeocodeStore::open(&cache_dir))
            .with_live_lookup(config.resolver.live_lookup)
            .with_ttl(Duration::from_secs(config.resolver.geocode_ttl_secs));
        let weather =
            WeatherFetcher::with_station_ttl(api, Duration::from_secs(config.station.ttl_secs));

        Ok(Self::from_parts(resolver, weather))
    }

    pub fn resolver(&self) -> &GeocodeResolver {
        &self.resolver
    }

    /// Geocode for the coordinates
    pub async fn resolve_geocode(&self, lat: f64, lon: f64) -> Option<String> {
        self.resolver.resolve(lat, lon).await
    }

    /// Geocode with the tier that produced it
    pub async fn resolve_detailed(&self, lat: f64, lon: f64) -> Option<Resolution> {
        self.resolver.resolve_detailed(lat, lon).await
    }

    pub async fn current_weather(&self, geocode: &str) -> Option<Value> {
        self.weather.current_weather(geocode).await
    }

    pub async fn forecast(&self, geocode: &str) -> Option<Value> {
        self.weather.forecast(geocode).await
    }

    pub async fn nearest_station(&self, lat: f64, lon: f64) -> Option<Value> {
        self.weather.nearest_station(&self.resolver, lat, lon).await
    }

    /// Whether the coordinates lie within Brazil
    pub fn is_in_territory(&self, lat: f64, lon: f64) -> bool {
        boundary::is_in_territory(lat, lon)
    }

    /// Territory answer with the method that produced it
    pub fn check_territory(&self, lat: f64, lon: f64) -> TerritoryCheck {
        boundary::check_territory(lat, lon)
    }
}
