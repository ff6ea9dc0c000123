//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/inmet-geocode/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Geocode resolver settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Nearest-station cache settings
    #[serde(default)]
    pub station: StationConfig,

    /// On-disk cache location
    #[serde(default)]
    pub cache: CacheConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the INMET forecast API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Geocode resolver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Query the live area lookup before the static table
    #[serde(default = "default_live_lookup")]
    pub live_lookup: bool,

    /// How long a cached geocode is trusted, in seconds
    #[serde(default = "default_geocode_ttl_secs")]
    pub geocode_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// How long a station payload is fresh, in seconds
    #[serde(default = "default_station_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory; empty means the platform cache dir
    #[serde(default)]
    pub dir: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_live_lookup() -> bool {
    DEFAULT_LIVE_LOOKUP
}
fn default_geocode_ttl_secs() -> u64 {
    DEFAULT_GEOCODE_TTL_SECS
}
fn default_station_ttl_secs() -> u64 {
    DEFAULT_STATION_TTL_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            live_lookup: default_live_lookup(),
            geocode_ttl_secs: default_geocode_ttl_secs(),
        }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_station_ttl_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Some(self.api.base_url.clone()),
            ["api", "timeout_secs"] => Some(self.api.timeout_secs.to_string()),

            ["resolver", "live_lookup"] => Some(self.resolver.live_lookup.to_string()),
            ["resolver", "geocode_ttl_secs"] => Some(self.resolver.geocode_ttl_secs.to_string()),

            ["station", "ttl_secs"] => Some(self.station.ttl_secs.to_string()),

            ["cache", "dir"] => Some(self.cache.dir.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(Error::Config(format!("Invalid base URL: {}", value)));
                }
                self.api.base_url = value.to_string();
            }
            ["api", "timeout_secs"] => {
                self.api.timeout_secs = parse_secs(value)?;
            }

            ["resolver", "live_lookup"] => {
                self.resolver.live_lookup = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }
            ["resolver", "geocode_ttl_secs"] => {
                self.resolver.geocode_ttl_secs = parse_secs(value)?;
            }

            ["station", "ttl_secs"] => {
                self.station.ttl_secs = parse_secs(value)?;
            }

            ["cache", "dir"] => {
                self.cache.dir = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "api.base_url",
            "api.timeout_secs",
            "resolver.live_lookup",
            "resolver.geocode_ttl_secs",
            "station.ttl_secs",
            "cache.dir",
            "server.host",
            "server.port",
        ]
    }

    /// Directory holding the geocode cache file
    ///
    /// `cache.dir` when set, otherwise the platform cache directory.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if !self.cache.dir.is_empty() {
            return Ok(PathBuf::from(&self.cache.dir));
        }
        dirs::cache_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine cache directory".to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_secs(value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(Error::Config(format!("Invalid duration in seconds: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "https://apiprevmet3.inmet.gov.br");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.resolver.live_lookup);
        assert_eq!(config.resolver.geocode_ttl_secs, 172_800);
        assert_eq!(config.station.ttl_secs, 7_200);
        assert!(config.cache.dir.is_empty());
        assert_eq!(config.server.port, 7879);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("resolver.live_lookup"), Some("true".to_string()));

        config.set("resolver.live_lookup", "false").unwrap();
        assert_eq!(config.get("resolver.live_lookup"), Some("false".to_string()));
        assert!(!config.resolver.live_lookup);

        config.set("station.ttl_secs", "600").unwrap();
        assert_eq!(config.station.ttl_secs, 600);

        config.set("cache.dir", "/tmp/inmet").unwrap();
        assert_eq!(config.get("cache.dir"), Some("/tmp/inmet".to_string()));
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
        assert_eq!(config.get("api"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("api.timeout_secs", "soon").is_err());
        assert!(config.set("api.timeout_secs", "0").is_err());
        assert!(config.set("resolver.live_lookup", "maybe").is_err());
        assert!(config.set("server.port", "70000").is_err());
        assert!(config.set("api.base_url", "ftp://example.com").is_err());
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_every_available_key_is_readable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "{} should be readable", key);
        }
    }

    #[test]
    fn test_cache_dir_override() {
        let mut config = Config::default();
        config.cache.dir = "/var/cache/inmet".to_string();
        assert_eq!(config.cache_dir().unwrap(), PathBuf::from("/var/cache/inmet"));
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.resolver.live_lookup = false;
            config.api.timeout_secs = 10;
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert!(!loaded.resolver.live_lookup);
            assert_eq!(loaded.api.timeout_secs, 10);
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[resolver]\nlive_lookup = false\n").unwrap();
        assert!(!loaded.resolver.live_lookup);
        assert_eq!(loaded.resolver.geocode_ttl_secs, 172_800);
        assert_eq!(loaded.api.timeout_secs, 30);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[api]"));
        assert!(toml.contains("[resolver]"));
        assert!(toml.contains("[station]"));
        assert!(toml.contains("[cache]"));
        assert!(toml.contains("[server]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7879");
    }
}
