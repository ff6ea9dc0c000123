//! inmet-geocode: INMET geocode resolution and weather lookup
//!
//! A library and CLI tool that maps coordinates to INMET (Brazil's national
//! meteorological service) area geocodes and fetches weather payloads for
//! them, degrading gracefully when the upstream service is unavailable.
//!
//! ## Features
//!
//! - Geocode resolution: persistent cache, live area lookup, then the closest
//!   state capital
//! - Current conditions, forecasts and nearest station with last-known fallback
//! - Point-in-polygon checks against Brazil's outline, with a bounding-box
//!   fallback
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```no_run
//! use inmet_geocode::api::InmetApi;
//! use inmet_geocode::cache::store::GeocodeStore;
//! use inmet_geocode::InmetClient;
//!
//! # async fn demo() {
//! let client = InmetClient::new(InmetApi::new(), GeocodeStore::in_memory());
//!
//! if client.is_in_territory(-22.9068, -43.1729) {
//!     let geocode = client.resolve_geocode(-22.9068, -43.1729).await;
//!     println!("Geocode: {:?}", geocode);
//! }
//! # }
//! ```

pub mod api;
pub mod boundary;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod geocode;
pub mod server;
pub mod weather;

// Re-export commonly used types
pub use boundary::{is_in_territory, CheckMethod, TerritoryCheck};
pub use client::InmetClient;
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use geocode::{Resolution, ResolutionSource};
