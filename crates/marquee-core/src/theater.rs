//! The normalized theater record shared by every geo provider.

use serde::{Deserialize, Serialize};

/// Address shown when a provider supplies no usable address parts.
pub const ADDRESS_PLACEHOLDER: &str = "Address not available";

/// Rating shown when a provider supplies no numeric rating.
pub const RATING_PLACEHOLDER: &str = "N/A";

/// Default radius, in meters, of the generic nearby search.
pub const DEFAULT_NEARBY_RADIUS_M: u32 = 12_000;

/// Default radius, in meters, of the movie-specific showtimes search.
pub const DEFAULT_SHOWTIMES_RADIUS_M: u32 = 20_000;

/// Format with one fractional digit, rounding exact ties away from zero.
///
/// `{:.1}` rounds ties to even, so `4.25` would render as `"4.2"`. Ties are
/// only exact for multiples of `0.25`, where scaling by ten is exact as well.
#[must_use]
pub fn format_one_decimal(value: f64) -> String {
    let scaled = value * 10.0;
    let exact_tie = (value * 4.0).fract().abs() < f64::EPSILON
        && (scaled.fract().abs() - 0.5).abs() < f64::EPSILON;
    if exact_tie {
        format!("{:.1}", scaled.round() / 10.0)
    } else {
        format!("{value:.1}")
    }
}

/// A theater near the query coordinate.
///
/// `distance` is always computed from the query origin, never taken from the
/// provider. `place_id` and `maps_url` are only set by the Google Places path;
/// `is_open` only when the provider reports live status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheaterRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    pub distance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
}

impl TheaterRecord {
    /// Numeric value of `distance`. Unparseable values sort last.
    #[must_use]
    pub fn distance_value(&self) -> f64 {
        self.distance.parse::<f64>().unwrap_or(f64::INFINITY)
    }

    #[must_use]
    pub fn has_rating(&self) -> bool {
        self.rating != RATING_PLACEHOLDER
    }
}

/// Sort records ascending by numeric distance. Ties keep their input order.
pub fn sort_by_distance(records: &mut [TheaterRecord]) {
    records.sort_by(|a, b| a.distance_value().total_cmp(&b.distance_value()));
}
