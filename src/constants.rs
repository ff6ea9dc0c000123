//! Centralized constants for the inmet-geocode crate
//!
//! Values shared by the resolver, the fetch layer and the boundary engine.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Decimal places kept when bucketing coordinates into a cache key (~1.1 km)
    pub const CACHE_KEY_PRECISION: i32 = 2;
}

/// INMET API endpoints
pub mod api {
    /// Production base URL of the INMET forecast API
    pub const INMET_BASE_URL: &str = "https://apiprevmet3.inmet.gov.br";

    /// Area lookup ("nearby areas for today"), POST
    pub const AREA_LOOKUP_PATH: &str = "/Previsao_Portal";

    /// Nearest station / current conditions by geocode, GET
    pub const STATION_PATH: &str = "/estacao/proxima";

    /// Forecast by geocode, GET
    pub const FORECAST_PATH: &str = "/previsao";

    /// Bounded timeout for every upstream call
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    pub const USER_AGENT: &str = concat!("inmet-geocode/", env!("CARGO_PKG_VERSION"));
}

/// Cache settings
pub mod cache {
    /// Geocode cache entries are trusted for 2 days
    pub const GEOCODE_TTL_SECS: u64 = 172_800;

    /// Station payloads are fresh for 2 hours
    pub const STATION_TTL_SECS: u64 = 7_200;

    /// On-disk geocode cache file name
    pub const GEOCODE_CACHE_FILE: &str = "inmet_geocode_cache.json";

    /// Provenance tag for entries produced by the static-table fallback
    pub const FALLBACK_SOURCE: &str = "fallback";
}

/// Boundary dataset settings
pub mod boundary {
    /// Environment variable pointing at a replacement dataset file
    pub const DATASET_ENV: &str = "INMET_BOUNDARY_DATASET";

    pub const BBOX_MIN_LAT: f64 = -33.75;
    pub const BBOX_MAX_LAT: f64 = 5.27;
    pub const BBOX_MIN_LON: f64 = -73.99;
    pub const BBOX_MAX_LON: f64 = -28.83;
}
