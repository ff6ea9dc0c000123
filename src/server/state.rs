//! Server shared state
//!
//! Holds configuration and the shared client for the HTTP server.

use crate::client::InmetClient;
use crate::config::Config;
use crate::error::Result;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration the server was started with
    pub config: Config,

    /// Resolver and fetch layer shared by every request
    pub client: InmetClient,

    started: Instant,
}

impl AppState {
    /// Create application state from configuration
    pub fn new(config: Config) -> Result<Self> {
        let client = InmetClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Create application state around an existing client
    pub fn with_client(config: Config, client: InmetClient) -> Self {
        Self {
            config,
            client,
            started: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
