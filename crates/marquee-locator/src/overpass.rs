//! Overpass API query building and response normalization.

use std::collections::HashMap;

use marquee_core::links::encode_component;
use marquee_core::{distance_km, Coordinate, TheaterRecord, ADDRESS_PLACEHOLDER, RATING_PLACEHOLDER};
use serde::Deserialize;

/// Top-level Overpass JSON response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// A node or way. Ways carry their centroid in `center`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

/// Overpass QL for cinema nodes and ways within `radius_m` of `origin`.
#[must_use]
pub fn cinema_query(origin: Coordinate, radius_m: u32) -> String {
    let around = format!("around:{radius_m},{},{}", origin.latitude, origin.longitude);
    format!(
        "[out:json][timeout:25];\n\
         (\n  \
           node[\"amenity\"=\"cinema\"]({around});\n  \
           way[\"amenity\"=\"cinema\"]({around});\n\
         );\n\
         out body;\n\
         >;\n\
         out skel qt;\n"
    )
}

/// Form body posted to an interpreter endpoint.
#[must_use]
pub fn form_body(query: &str) -> String {
    format!("data={}", encode_component(query))
}

/// Normalize raw elements into theater records.
///
/// Unnamed elements and elements without usable coordinates are dropped.
/// The result is not sorted.
#[must_use]
pub fn normalize_elements(origin: Coordinate, elements: &[OverpassElement]) -> Vec<TheaterRecord> {
    elements
        .iter()
        .filter_map(|element| normalize_element(origin, element))
        .collect()
}

fn normalize_element(origin: Coordinate, element: &OverpassElement) -> Option<TheaterRecord> {
    let name = element
        .tags
        .get("name")
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())?;
    let (latitude, longitude) = element_position(element)?;

    Some(TheaterRecord {
        id: element.id.to_string(),
        name: name.to_string(),
        address: element_address(&element.tags),
        latitude,
        longitude,
        rating: RATING_PLACEHOLDER.to_string(),
        is_open: None,
        distance: distance_km(origin.latitude, origin.longitude, latitude, longitude),
        place_id: None,
        maps_url: None,
    })
}

/// Own `lat`/`lon` first, then the way centroid. Both parts must be finite.
fn element_position(element: &OverpassElement) -> Option<(f64, f64)> {
    let lat = element.lat.or(element.center.map(|c| c.lat))?;
    let lon = element.lon.or(element.center.map(|c| c.lon))?;
    (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
}

fn element_address(tags: &HashMap<String, String>) -> String {
    let part = |key: &str| {
        tags.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    };
    match (part("addr:street"), part("addr:city")) {
        (Some(street), Some(city)) => format!("{street}, {city}"),
        (Some(street), None) => street.to_string(),
        (None, Some(city)) => city.to_string(),
        (None, None) => ADDRESS_PLACEHOLDER.to_string(),
    }
}
