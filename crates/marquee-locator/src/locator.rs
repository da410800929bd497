//! Theater search orchestration.

use std::time::Duration;

use marquee_core::{sort_by_distance, AppConfig, Coordinate, TheaterRecord};
use reqwest::{Client, Url};

use crate::error::{
    AttemptError, LocatorError, NONE_FOR_MOVIE, NONE_NEARBY, SEARCH_TIMED_OUT, SEARCH_UNAVAILABLE,
    SHOWTIMES_UNAVAILABLE,
};
use crate::fetch::{get_json, post_form_json, redact_key};
use crate::overpass::{self, OverpassResponse};
use crate::places::{self, PlacesResponse};

/// Everything a [`TheaterLocator`] needs, resolved up front by the caller.
#[derive(Clone)]
pub struct LocatorSettings {
    /// Overpass interpreter URLs in priority order.
    pub overpass_endpoints: Vec<String>,
    pub places_base_url: String,
    pub places_api_key: Option<String>,
    /// Timeout applied independently to each request attempt.
    pub attempt_timeout: Duration,
    pub user_agent: String,
}

impl LocatorSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            overpass_endpoints: config.overpass_endpoints.clone(),
            places_base_url: config.places_base_url.clone(),
            places_api_key: config.google_places_api_key.clone(),
            attempt_timeout: Duration::from_secs(config.request_timeout_secs),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl std::fmt::Debug for LocatorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocatorSettings")
            .field("overpass_endpoints", &self.overpass_endpoints)
            .field("places_base_url", &self.places_base_url)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("attempt_timeout", &self.attempt_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Finds theaters near a coordinate.
///
/// Holds no per-query state; every call builds and returns a fresh list.
pub struct TheaterLocator {
    client: Client,
    overpass_endpoints: Vec<String>,
    places_base_url: Url,
    places_api_key: Option<String>,
    attempt_timeout: Duration,
}

impl TheaterLocator {
    /// # Errors
    ///
    /// Returns [`LocatorError::Client`] if the HTTP client cannot be built, or
    /// [`LocatorError::TheaterSearchFailed`] if the Places base URL is invalid.
    pub fn new(settings: LocatorSettings) -> Result<Self, LocatorError> {
        let client = Client::builder()
            .connect_timeout(settings.attempt_timeout)
            .user_agent(&settings.user_agent)
            .build()
            .map_err(LocatorError::Client)?;

        let places_base_url = Url::parse(&settings.places_base_url).map_err(|e| {
            LocatorError::TheaterSearchFailed(format!(
                "invalid Places base URL '{}': {e}",
                settings.places_base_url
            ))
        })?;

        Ok(Self {
            client,
            overpass_endpoints: settings.overpass_endpoints,
            places_base_url,
            places_api_key: settings.places_api_key,
            attempt_timeout: settings.attempt_timeout,
        })
    }

    /// Whether a Google Places key is configured for the showtimes search.
    #[must_use]
    pub fn has_places_credential(&self) -> bool {
        self.places_api_key.is_some()
    }

    /// Cinemas within `radius_m` of the coordinate, nearest first.
    ///
    /// Tries each Overpass endpoint in order; the first success with a
    /// well-formed body wins. Per-endpoint failures are logged and skipped.
    ///
    /// # Errors
    ///
    /// [`LocatorError::TheaterSearchFailed`] when every endpoint fails (the
    /// message says "timed out" if the last failure was a timeout) or when no
    /// named cinema with coordinates is found.
    pub async fn find_nearby_theaters(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
    ) -> Result<Vec<TheaterRecord>, LocatorError> {
        let origin = Coordinate::new(latitude, longitude);
        let body = overpass::form_body(&overpass::cinema_query(origin, radius_m));

        let mut last_error: Option<AttemptError> = None;
        let mut response: Option<OverpassResponse> = None;

        for endpoint in &self.overpass_endpoints {
            tracing::debug!(endpoint, radius_m, "querying overpass endpoint");
            match post_form_json::<OverpassResponse>(
                &self.client,
                endpoint,
                body.clone(),
                self.attempt_timeout,
            )
            .await
            {
                Ok(parsed) => {
                    response = Some(parsed);
                    break;
                }
                Err(err) => {
                    tracing::warn!(endpoint, error = %err, "overpass endpoint failed; trying next");
                    last_error = Some(err);
                }
            }
        }

        let Some(response) = response else {
            let timed_out = last_error.as_ref().is_some_and(AttemptError::is_timeout);
            tracing::warn!(timed_out, "all overpass endpoints failed");
            return Err(LocatorError::search_failed(if timed_out {
                SEARCH_TIMED_OUT
            } else {
                SEARCH_UNAVAILABLE
            }));
        };

        let mut theaters = overpass::normalize_elements(origin, &response.elements);
        if theaters.is_empty() {
            tracing::debug!(
                elements = response.elements.len(),
                "no named cinemas with coordinates"
            );
            return Err(LocatorError::search_failed(NONE_NEARBY));
        }

        sort_by_distance(&mut theaters);
        tracing::debug!(count = theaters.len(), "found nearby theaters");
        Ok(theaters)
    }

    /// Theaters likely showing `movie_title`, nearest first.
    ///
    /// Runs a keyword-filtered Nearby Search for open theaters and, only if it
    /// returns nothing, a `"<title> showtimes"` Text Search.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::MissingCredential`] without a Places key, before any
    ///   request is made.
    /// - [`LocatorError::TheaterSearchFailed`] when both searches come back
    ///   empty, or uniformly for any request or response failure.
    pub async fn find_theaters_showing_movie(
        &self,
        movie_title: &str,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
    ) -> Result<Vec<TheaterRecord>, LocatorError> {
        let api_key = self
            .places_api_key
            .as_deref()
            .ok_or(LocatorError::MissingCredential)?;
        let origin = Coordinate::new(latitude, longitude);

        let results = match self
            .showtimes_results(movie_title, origin, radius_m, api_key)
            .await
        {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(movie_title, error = %err, "places search failed");
                return Err(LocatorError::search_failed(SHOWTIMES_UNAVAILABLE));
            }
        };

        let mut theaters = places::normalize_results(origin, &results);
        if theaters.is_empty() {
            return Err(LocatorError::search_failed(NONE_FOR_MOVIE));
        }

        sort_by_distance(&mut theaters);
        tracing::debug!(movie_title, count = theaters.len(), "found showtimes theaters");
        Ok(theaters)
    }

    async fn showtimes_results(
        &self,
        movie_title: &str,
        origin: Coordinate,
        radius_m: u32,
        api_key: &str,
    ) -> Result<Vec<places::PlaceResult>, AttemptError> {
        let nearby =
            places::nearby_search_url(&self.places_base_url, movie_title, origin, radius_m, api_key);
        let results = self.places_request(nearby).await?;
        if !results.is_empty() {
            return Ok(results);
        }

        tracing::debug!(movie_title, "nearby search empty; falling back to text search");
        let text =
            places::text_search_url(&self.places_base_url, movie_title, origin, radius_m, api_key);
        self.places_request(text).await
    }

    async fn places_request(&self, url: Url) -> Result<Vec<places::PlaceResult>, AttemptError> {
        let label = redact_key(&url);
        let response: PlacesResponse = get_json(&self.client, url, self.attempt_timeout).await?;
        if !response.is_usable() {
            return Err(AttemptError::ProviderStatus {
                status: response.status.unwrap_or_default(),
                url: label,
            });
        }
        Ok(response.results)
    }
}
