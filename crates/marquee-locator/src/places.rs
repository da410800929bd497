//! Google Places Nearby/Text Search request building and normalization.
//!
//! Places does not expose showtimes. "Showing this movie" is approximated by a
//! keyword-filtered nearby search for open theaters, then a free-text
//! `"<title> showtimes"` search.

use marquee_core::{
    distance_km, format_one_decimal, Coordinate, TheaterRecord, ADDRESS_PLACEHOLDER,
    RATING_PLACEHOLDER,
};
use reqwest::Url;
use serde::Deserialize;

const PLACE_TYPE: &str = "movie_theater";

/// Envelope shared by Nearby Search and Text Search.
#[derive(Debug, Deserialize)]
pub struct PlacesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

impl PlacesResponse {
    /// `OK`, `ZERO_RESULTS`, or no status at all count as usable.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        matches!(self.status.as_deref(), None | Some("OK" | "ZERO_RESULTS"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceGeometry {
    #[serde(default)]
    pub location: Option<PlaceLocation>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlaceLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

/// Nearby Search URL keyworded with the movie title, open theaters only.
#[must_use]
pub fn nearby_search_url(
    base: &Url,
    movie_title: &str,
    origin: Coordinate,
    radius_m: u32,
    api_key: &str,
) -> Url {
    let mut url = endpoint(base, "nearbysearch/json");
    url.query_pairs_mut()
        .append_pair("location", &location_param(origin))
        .append_pair("radius", &radius_m.to_string())
        .append_pair("type", PLACE_TYPE)
        .append_pair("keyword", movie_title)
        .append_pair("opennow", "true")
        .append_pair("key", api_key);
    url
}

/// Text Search URL for `"<title> showtimes"`.
#[must_use]
pub fn text_search_url(
    base: &Url,
    movie_title: &str,
    origin: Coordinate,
    radius_m: u32,
    api_key: &str,
) -> Url {
    let mut url = endpoint(base, "textsearch/json");
    url.query_pairs_mut()
        .append_pair("query", &format!("{movie_title} showtimes"))
        .append_pair("location", &location_param(origin))
        .append_pair("radius", &radius_m.to_string())
        .append_pair("type", PLACE_TYPE)
        .append_pair("key", api_key);
    url
}

fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!("{}/{path}", url.path().trim_end_matches('/'));
    url.set_path(&joined);
    url.set_query(None);
    url
}

fn location_param(origin: Coordinate) -> String {
    format!("{},{}", origin.latitude, origin.longitude)
}

#[must_use]
pub fn place_maps_url(place_id: &str) -> String {
    format!("https://www.google.com/maps/search/?api=1&query_place_id={place_id}")
}

/// Normalize Places results into theater records.
///
/// Results without a location or a name are dropped. The result is not sorted.
#[must_use]
pub fn normalize_results(origin: Coordinate, results: &[PlaceResult]) -> Vec<TheaterRecord> {
    results
        .iter()
        .enumerate()
        .filter_map(|(index, result)| normalize_result(origin, index, result))
        .collect()
}

fn normalize_result(origin: Coordinate, index: usize, result: &PlaceResult) -> Option<TheaterRecord> {
    let location = result.geometry.as_ref()?.location?;
    let name = result
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())?;
    if !(location.lat.is_finite() && location.lng.is_finite()) {
        return None;
    }

    let place_id = result.place_id.clone().filter(|id| !id.is_empty());
    let address = result
        .formatted_address
        .as_deref()
        .or(result.vicinity.as_deref())
        .filter(|a| !a.trim().is_empty())
        .unwrap_or(ADDRESS_PLACEHOLDER)
        .to_string();

    Some(TheaterRecord {
        id: place_id.clone().unwrap_or_else(|| index.to_string()),
        name: name.to_string(),
        address,
        latitude: location.lat,
        longitude: location.lng,
        rating: format_rating(result.rating.as_ref()),
        is_open: result.opening_hours.and_then(|h| h.open_now),
        distance: distance_km(origin.latitude, origin.longitude, location.lat, location.lng),
        maps_url: place_id.as_deref().map(place_maps_url),
        place_id,
    })
}

fn format_rating(rating: Option<&serde_json::Value>) -> String {
    rating
        .and_then(serde_json::Value::as_f64)
        .filter(|r| r.is_finite())
        .map_or_else(|| RATING_PLACEHOLDER.to_string(), format_one_decimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://maps.googleapis.com/maps/api/place").unwrap()
    }

    fn result(json: serde_json::Value) -> PlaceResult {
        serde_json::from_value(json).expect("valid place result")
    }

    #[test]
    fn nearby_url_carries_keyword_and_opennow() {
        let url = nearby_search_url(&base(), "Dune", Coordinate::new(1.5, 2.5), 20_000, "k");
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/place/nearbysearch/json?location=1.5%2C2.5&radius=20000&type=movie_theater&keyword=Dune&opennow=true&key=k"
        );
    }

    #[test]
    fn text_url_appends_showtimes_to_title() {
        let url = text_search_url(&base(), "Dune", Coordinate::new(1.5, 2.5), 20_000, "k");
        assert_eq!(url.path(), "/maps/api/place/textsearch/json");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("query".to_string(), "Dune showtimes".to_string())));
        assert!(query.contains(&("type".to_string(), "movie_theater".to_string())));
        assert!(!query.iter().any(|(k, _)| k == "opennow"));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_in_base() {
        let base = Url::parse("http://127.0.0.1:9/place/").unwrap();
        let url = nearby_search_url(&base, "x", Coordinate::new(0.0, 0.0), 1, "k");
        assert_eq!(url.path(), "/place/nearbysearch/json");
    }

    #[test]
    fn full_result_is_normalized() {
        let r = result(serde_json::json!({
            "place_id": "ChIJ123",
            "name": "Regal Union Square",
            "formatted_address": "850 Broadway, New York",
            "geometry": {"location": {"lat": 40.0, "lng": -73.0}},
            "rating": 4.36,
            "opening_hours": {"open_now": true}
        }));
        let records = normalize_results(Coordinate::new(40.0, -73.0), &[r]);
        assert_eq!(records.len(), 1);
        let t = &records[0];
        assert_eq!(t.id, "ChIJ123");
        assert_eq!(t.address, "850 Broadway, New York");
        assert_eq!(t.rating, "4.4");
        assert_eq!(t.is_open, Some(true));
        assert_eq!(t.distance, "0.0");
        assert_eq!(t.place_id.as_deref(), Some("ChIJ123"));
        assert_eq!(
            t.maps_url.as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query_place_id=ChIJ123")
        );
    }

    #[test]
    fn sparse_result_uses_index_vicinity_and_placeholders() {
        let results = vec![
            result(serde_json::json!({"name": "No Geometry"})),
            result(serde_json::json!({
                "name": "Corner Cinema",
                "vicinity": "5 Elm St",
                "geometry": {"location": {"lat": 1.0, "lng": 1.0}},
                "rating": "great"
            })),
        ];
        let records = normalize_results(Coordinate::new(1.0, 1.0), &results);
        assert_eq!(records.len(), 1);
        let t = &records[0];
        assert_eq!(t.id, "1");
        assert_eq!(t.address, "5 Elm St");
        assert_eq!(t.rating, "N/A");
        assert_eq!(t.is_open, None);
        assert!(t.place_id.is_none());
        assert!(t.maps_url.is_none());
    }

    #[test]
    fn nameless_result_is_dropped() {
        let r = result(serde_json::json!({
            "geometry": {"location": {"lat": 1.0, "lng": 1.0}}
        }));
        assert!(normalize_results(Coordinate::new(1.0, 1.0), &[r]).is_empty());
    }

    #[test]
    fn request_denied_status_is_not_usable() {
        let resp: PlacesResponse = serde_json::from_value(serde_json::json!({
            "status": "REQUEST_DENIED",
            "results": []
        }))
        .unwrap();
        assert!(!resp.is_usable());

        let ok: PlacesResponse =
            serde_json::from_value(serde_json::json!({"status": "ZERO_RESULTS"})).unwrap();
        assert!(ok.is_usable());
    }
}
