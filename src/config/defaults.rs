//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::{api, cache};

/// Default INMET API base URL
pub const DEFAULT_BASE_URL: &str = api::INMET_BASE_URL;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = api::REQUEST_TIMEOUT_SECS;

/// Live area lookup is on unless disabled
pub const DEFAULT_LIVE_LOOKUP: bool = true;

/// Default geocode cache TTL in seconds (2 days)
pub const DEFAULT_GEOCODE_TTL_SECS: u64 = cache::GEOCODE_TTL_SECS;

/// Default station cache TTL in seconds (2 hours)
pub const DEFAULT_STATION_TTL_SECS: u64 = cache::STATION_TTL_SECS;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "inmet-geocode";
