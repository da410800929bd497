//! Integration tests for `TheaterLocator::find_theaters_showing_movie`.
//!
//! A `wiremock` server stands in for the Places base URL.

use std::time::Duration;

use marquee_locator::{LocatorError, LocatorSettings, TheaterLocator};
use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NEARBY: &str = "/place/nearbysearch/json";
const TEXT: &str = "/place/textsearch/json";

fn locator(server: &MockServer, api_key: Option<&str>) -> TheaterLocator {
    TheaterLocator::new(LocatorSettings {
        overpass_endpoints: vec![format!("{}/api/interpreter", server.uri())],
        places_base_url: format!("{}/place", server.uri()),
        places_api_key: api_key.map(str::to_string),
        attempt_timeout: Duration::from_secs(5),
        user_agent: "marquee-test/0.1".to_string(),
    })
    .expect("locator construction should not fail")
}

fn place(id: &str, name: &str, lat: f64, lng: f64) -> serde_json::Value {
    json!({
        "place_id": id,
        "name": name,
        "vicinity": format!("{name} Plaza"),
        "geometry": {"location": {"lat": lat, "lng": lng}},
        "rating": 4.25,
        "opening_hours": {"open_now": true}
    })
}

fn message_of(err: LocatorError) -> String {
    match err {
        LocatorError::TheaterSearchFailed(message) => message,
        other => panic!("expected TheaterSearchFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_key_fails_without_any_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = locator(&server, None)
        .find_theaters_showing_movie("Dune", 40.0, -73.0, 20_000)
        .await
        .unwrap_err();

    assert!(matches!(err, LocatorError::MissingCredential));
}

#[tokio::test]
async fn nearby_results_are_normalized_and_sorted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY))
        .and(query_param("keyword", "Dune"))
        .and(query_param("type", "movie_theater"))
        .and(query_param("opennow", "true"))
        .and(query_param("radius", "20000"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                place("far", "Far Screens", 40.2, -73.0),
                place("near", "Near Screens", 40.0, -73.0)
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TEXT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "results": []})))
        .expect(0)
        .mount(&server)
        .await;

    let theaters = locator(&server, Some("test-key"))
        .find_theaters_showing_movie("Dune", 40.0, -73.0, 20_000)
        .await
        .expect("search should succeed");

    assert_eq!(theaters.len(), 2);
    assert_eq!(theaters[0].id, "near");
    assert_eq!(theaters[0].distance, "0.0");
    assert_eq!(theaters[0].rating, "4.3");
    assert_eq!(theaters[0].is_open, Some(true));
    assert_eq!(theaters[0].address, "Near Screens Plaza");
    assert_eq!(theaters[1].id, "far");
}

#[tokio::test]
async fn empty_nearby_falls_back_to_text_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TEXT))
        .and(query_param("query", "Dune showtimes"))
        .and(query_param("type", "movie_theater"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "place_id": "text-1",
                "name": "Text Cinema",
                "formatted_address": "9 Side St, Town",
                "geometry": {"location": {"lat": 40.01, "lng": -73.0}}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let theaters = locator(&server, Some("test-key"))
        .find_theaters_showing_movie("Dune", 40.0, -73.0, 20_000)
        .await
        .expect("text fallback should succeed");

    assert_eq!(theaters.len(), 1);
    assert_eq!(theaters[0].name, "Text Cinema");
    assert_eq!(theaters[0].address, "9 Side St, Town");
    assert_eq!(theaters[0].rating, "N/A");
    assert_eq!(theaters[0].is_open, None);
}

#[tokio::test]
async fn both_searches_empty_is_no_theaters_for_movie() {
    let server = MockServer::start().await;
    for p in [NEARBY, TEXT] {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let err = locator(&server, Some("test-key"))
        .find_theaters_showing_movie("Dune", 40.0, -73.0, 20_000)
        .await
        .unwrap_err();

    assert_eq!(message_of(err), "No theaters found for this movie nearby");
}

#[tokio::test]
async fn server_error_maps_to_uniform_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = locator(&server, Some("test-key"))
        .find_theaters_showing_movie("Dune", 40.0, -73.0, 20_000)
        .await
        .unwrap_err();

    assert_eq!(
        message_of(err),
        "Unable to find showtimes theaters right now. Please try again later."
    );
}

#[tokio::test]
async fn provider_denial_maps_to_uniform_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let err = locator(&server, Some("bad-key"))
        .find_theaters_showing_movie("Dune", 40.0, -73.0, 20_000)
        .await
        .unwrap_err();

    let message = message_of(err);
    assert!(message.contains("try again later"), "got {message:?}");
    assert!(!message.contains("bad-key"));
}

#[tokio::test]
async fn text_search_failure_after_empty_nearby_is_uniform() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TEXT))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = locator(&server, Some("test-key"))
        .find_theaters_showing_movie("Dune", 40.0, -73.0, 20_000)
        .await
        .unwrap_err();

    assert_eq!(
        message_of(err),
        "Unable to find showtimes theaters right now. Please try again later."
    );
}
