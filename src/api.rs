//! INMET HTTP transport
//!
//! Thin wrapper over a shared `reqwest::Client`. Every call carries the
//! configured per-request timeout, and any non-200 answer becomes
//! [`Error::Upstream`]. Fallback decisions belong to the callers.

use crate::constants::api::{
    AREA_LOOKUP_PATH, FORECAST_PATH, INMET_BASE_URL, REQUEST_TIMEOUT_SECS, STATION_PATH,
    USER_AGENT,
};
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Body of the area lookup request
#[derive(Debug, Clone, Serialize)]
struct AreaLookupRequest {
    /// Local calendar date, `YYYY-MM-DD`
    data: String,
    tipo: &'static str,
    turno: &'static str,
}

impl AreaLookupRequest {
    fn for_today() -> Self {
        Self {
            data: chrono::Local::now().format("%Y-%m-%d").to_string(),
            tipo: "turno",
            turno: "tarde",
        }
    }
}

/// Client for the three INMET endpoints
#[derive(Debug, Clone)]
pub struct InmetApi {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl InmetApi {
    /// Production endpoint with the default timeout
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self::with_client(
            client,
            INMET_BASE_URL,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    /// Use an existing client, base URL and timeout
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn with_client(client: reqwest::Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Areas with forecasts for today (`POST /Previsao_Portal`)
    pub async fn nearby_areas(&self) -> Result<Value> {
        let url = format!("{}{}", self.base_url, AREA_LOOKUP_PATH);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&AreaLookupRequest::for_today())
            .timeout(self.timeout)
            .send()
            .await?;

        read_json(response).await
    }

    /// Nearest station and its current readings (`GET /estacao/proxima/{geocode}`)
    pub async fn station(&self, geocode: &str) -> Result<Value> {
        self.get_by_geocode(STATION_PATH, geocode).await
    }

    /// Forecast for the area (`GET /previsao/{geocode}`)
    pub async fn forecast(&self, geocode: &str) -> Result<Value> {
        self.get_by_geocode(FORECAST_PATH, geocode).await
    }

    async fn get_by_geocode(&self, path: &str, geocode: &str) -> Result<Value> {
        let url = format!(
            "{}{}/{}",
            self.base_url,
            path,
            urlencoding::encode(geocode)
        );
        debug!("GET {}", url);

        let response = self.client.get(&url).timeout(self.timeout).send().await?;

        read_json(response).await
    }
}

impl Default for InmetApi {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(Error::Upstream(status.as_u16()));
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| Error::Payload(format!("Response is not JSON: {}", e)))
}
