//! Integration tests for GeocodeResolver using wiremock.
//!
//! These tests verify the resolution tiers against a mock area lookup.

use inmet_geocode::api::InmetApi;
use inmet_geocode::cache::store::{GeocodeCacheEntry, GeocodeStore};
use inmet_geocode::geocode::{GeocodeResolver, ResolutionSource};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CACHE_FILE: &str = "inmet_geocode_cache.json";

fn api_for(server: &MockServer, timeout: Duration) -> InmetApi {
    InmetApi::with_client(reqwest::Client::new(), &server.uri(), timeout)
}

fn resolver_for(server: &MockServer, store: GeocodeStore) -> GeocodeResolver {
    GeocodeResolver::new(api_for(server, Duration::from_secs(5)), store)
}

/// Keyed payload with Niteroi and Rio de Janeiro
fn keyed_areas() -> serde_json::Value {
    json!({
        "3303302": {"nome": "Niterói", "centroide": {"lat": -22.8832, "lon": -43.1034}},
        "3304557": {"nome": "Rio de Janeiro", "centroide": {"lat": "-22.9068", "lon": "-43.1729"}}
    })
}

fn read_cache_file(dir: &TempDir) -> HashMap<String, serde_json::Value> {
    let content = std::fs::read_to_string(dir.path().join(CACHE_FILE)).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[tokio::test]
async fn test_live_lookup_keyed_shape() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Previsao_Portal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyed_areas()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server, GeocodeStore::in_memory());
    let resolution = resolver.resolve_detailed(-22.885, -43.105).await.unwrap();

    assert_eq!(resolution.geocode, "3303302");
    assert_eq!(resolution.source, ResolutionSource::Live);
}

#[tokio::test]
async fn test_live_lookup_listed_shape() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Previsao_Portal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"geocode": 3550308, "centroide": "-46.6333,-23.5505"},
            {"geocode": "3509502", "centroide": "-47.0608,-22.9056"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server, GeocodeStore::in_memory());
    assert_eq!(resolver.resolve(-22.91, -47.05).await.as_deref(), Some("3509502"));
}

#[tokio::test]
async fn test_cache_prevents_second_live_call() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Previsao_Portal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyed_areas()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server, GeocodeStore::in_memory());
    let first = resolver.resolve(-22.9068, -43.1729).await;
    let second = resolver.resolve_detailed(-22.9068, -43.1729).await.unwrap();

    assert_eq!(first.as_deref(), Some("3304557"));
    assert_eq!(second.geocode, "3304557");
    assert_eq!(second.source, ResolutionSource::Cache);
}

#[tokio::test]
async fn test_live_answer_is_persisted_without_source() {
    let temp_dir = TempDir::new().unwrap();
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyed_areas()))
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server, GeocodeStore::open(temp_dir.path()));
    resolver.resolve(-22.9068, -43.1729).await;

    let cache = read_cache_file(&temp_dir);
    let entry = &cache["-22.91,-43.17"];
    assert_eq!(entry["geocode"], "3304557");
    assert_eq!(entry["latitude"], -22.9068);
    assert_eq!(entry["longitude"], -43.1729);
    assert!(entry["timestamp"].as_f64().unwrap() > 0.0);
    assert!(entry.get("source").is_none());
}

#[tokio::test]
async fn test_cache_survives_new_resolver() {
    let temp_dir = TempDir::new().unwrap();
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyed_areas()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let first = resolver_for(&mock_server, GeocodeStore::open(temp_dir.path()));
    assert_eq!(first.resolve(-22.885, -43.105).await.as_deref(), Some("3303302"));
    drop(first);

    let second = resolver_for(&mock_server, GeocodeStore::open(temp_dir.path()));
    let resolution = second.resolve_detailed(-22.885, -43.105).await.unwrap();
    assert_eq!(resolution.geocode, "3303302");
    assert_eq!(resolution.source, ResolutionSource::Cache);
}

#[tokio::test]
async fn test_expired_cache_entry_triggers_live_call() {
    let temp_dir = TempDir::new().unwrap();
    let now = chrono::Utc::now().timestamp() as f64;
    let stale = GeocodeCacheEntry::live("9999999".to_string(), -22.9068, -43.1729, now - 172_801.0);
    let mut entries = HashMap::new();
    entries.insert("-22.91,-43.17".to_string(), stale);
    std::fs::write(
        temp_dir.path().join(CACHE_FILE),
        serde_json::to_string(&entries).unwrap(),
    )
    .unwrap();

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyed_areas()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server, GeocodeStore::open(temp_dir.path()));
    let resolution = resolver.resolve_detailed(-22.9068, -43.1729).await.unwrap();

    assert_eq!(resolution.geocode, "3304557");
    assert_eq!(resolution.source, ResolutionSource::Live);
    assert_eq!(read_cache_file(&temp_dir)["-22.91,-43.17"]["geocode"], "3304557");
}

#[tokio::test]
async fn test_server_error_falls_back_to_capitals() {
    let temp_dir = TempDir::new().unwrap();
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server, GeocodeStore::open(temp_dir.path()));
    let resolution = resolver.resolve_detailed(-23.5505, -46.6333).await.unwrap();

    assert_eq!(resolution.geocode, "3550308");
    assert_eq!(resolution.source, ResolutionSource::Fallback);
    assert_eq!(read_cache_file(&temp_dir)["-23.55,-46.63"]["source"], "fallback");
}

#[tokio::test]
async fn test_empty_payload_falls_back_to_capitals() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server, GeocodeStore::in_memory());
    let resolution = resolver.resolve_detailed(-15.7939, -47.8828).await.unwrap();

    assert_eq!(resolution.geocode, "5300108");
    assert_eq!(resolution.source, ResolutionSource::Fallback);
}

#[tokio::test]
async fn test_non_json_payload_falls_back() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server, GeocodeStore::in_memory());
    assert_eq!(resolver.resolve(-22.9068, -43.1729).await.as_deref(), Some("3304557"));
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(keyed_areas())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let resolver = GeocodeResolver::new(
        api_for(&mock_server, Duration::from_millis(50)),
        GeocodeStore::in_memory(),
    );
    let resolution = resolver.resolve_detailed(-22.885, -43.105).await.unwrap();

    // Niteroi is not a capital, so the table answers with Rio
    assert_eq!(resolution.geocode, "3304557");
    assert_eq!(resolution.source, ResolutionSource::Fallback);
}

#[tokio::test]
async fn test_offline_resolver_never_calls_upstream() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyed_areas()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let resolver =
        resolver_for(&mock_server, GeocodeStore::in_memory()).with_live_lookup(false);
    assert_eq!(resolver.resolve(-22.885, -43.105).await.as_deref(), Some("3304557"));
}
