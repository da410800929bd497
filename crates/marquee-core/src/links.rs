//! Deep links and search URLs handed to external apps.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Target platform for a maps deep link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapsPlatform {
    Ios,
    Android,
}

/// Percent-encode `s` the way `encodeURIComponent` does.
#[must_use]
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Deep link that opens the platform maps app pinned at a theater.
#[must_use]
pub fn maps_deep_link(platform: MapsPlatform, name: &str, latitude: f64, longitude: f64) -> String {
    let label = encode_component(name);
    match platform {
        MapsPlatform::Ios => format!("maps:0,0?q={label}@{latitude},{longitude}"),
        MapsPlatform::Android => format!("geo:0,0?q={latitude},{longitude}({label})"),
    }
}

/// Web search for a movie's showtimes at a given theater.
#[must_use]
pub fn showtimes_search_url(movie_title: &str, theater_name: &str) -> String {
    let q = encode_component(&format!("{movie_title} showtimes {theater_name}"));
    format!("https://www.google.com/search?q={q}")
}

#[must_use]
pub fn trailer_search_url(title: &str) -> String {
    let q = encode_component(&format!("{title} official trailer"));
    format!("https://www.youtube.com/results?search_query={q}")
}

/// Five-glyph star bar for a 0–10 rating; `round(rating / 2)` stars filled.
#[must_use]
pub fn star_rating(rating: f64) -> String {
    let filled = if rating.is_finite() {
        (rating / 2.0).round().clamp(0.0, 5.0)
    } else {
        0.0
    };
    (1..=5u8)
        .map(|i| if f64::from(i) <= filled { '★' } else { '☆' })
        .collect()
}
