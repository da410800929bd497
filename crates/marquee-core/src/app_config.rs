use std::path::PathBuf;

use crate::geo::Coordinate;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub store_path: PathBuf,
    /// Overpass interpreter URLs, tried in order.
    pub overpass_endpoints: Vec<String>,
    pub google_places_api_key: Option<String>,
    pub places_base_url: String,
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    /// Per-attempt timeout for every outbound request.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub nearby_radius_m: u32,
    pub showtimes_radius_m: u32,
    /// Fallback origin used when no coordinate is given on the command line.
    pub home_location: Option<Coordinate>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("store_path", &self.store_path)
            .field("overpass_endpoints", &self.overpass_endpoints)
            .field(
                "google_places_api_key",
                &self.google_places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field(
                "tmdb_api_key",
                &self.tmdb_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("nearby_radius_m", &self.nearby_radius_m)
            .field("showtimes_radius_m", &self.showtimes_radius_m)
            .field("home_location", &self.home_location)
            .finish()
    }
}
