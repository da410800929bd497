//! HTTP client for the TMDB v3 REST API.
//!
//! Wraps `reqwest` with TMDB-specific URL building, API key management and
//! typed response deserialization.

use std::time::Duration;

use futures::future::join_all;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::TmdbError;
use crate::movie::Movie;
use crate::types::{Credits, MovieDetails, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const LANGUAGE: &str = "en-US";
const DEFAULT_USER_AGENT: &str = "marquee/0.1 (theater-locator)";
const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Client for the TMDB API.
///
/// Use [`TmdbClient::new`] for production or [`TmdbClient::with_base_url`] to
/// point at a mock server in tests.
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl TmdbClient {
    /// Creates a new client pointed at the production TMDB API.
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, TmdbError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }

    /// Creates a new client with a custom base URL and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`TmdbError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TmdbError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, TmdbError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(
                timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS),
            ))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so request paths land after the version
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| TmdbError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches by title and resolves the best (first) match to full details.
    ///
    /// Returns `Ok(None)` when TMDB has no results.
    ///
    /// # Errors
    ///
    /// - [`TmdbError::Http`] on network failure.
    /// - [`TmdbError::UnexpectedStatus`] on a non-2xx status.
    /// - [`TmdbError::Deserialize`] if a body does not match the expected shape.
    pub async fn search_movie_by_title(&self, title: &str) -> Result<Option<Movie>, TmdbError> {
        let query = title.trim();
        let url = self.build_url(
            "search/movie",
            &[("query", query), ("page", "1"), ("include_adult", "false")],
        );
        let search: SearchResponse = self.get_json(url, "search/movie").await?;

        let Some(best) = search.results.first() else {
            tracing::debug!(query, "no tmdb results");
            return Ok(None);
        };
        tracing::debug!(query, tmdb_id = best.id, title = ?best.title, "tmdb best match");

        self.get_movie_details(best.id).await.map(Some)
    }

    /// Fetches `/movie/{id}` and `/movie/{id}/credits` and maps them to a [`Movie`].
    ///
    /// # Errors
    ///
    /// Same as [`TmdbClient::search_movie_by_title`].
    pub async fn get_movie_details(&self, id: u64) -> Result<Movie, TmdbError> {
        let details_path = format!("movie/{id}");
        let credits_path = format!("movie/{id}/credits");

        let details: MovieDetails = self
            .get_json(self.build_url(&details_path, &[]), &details_path)
            .await?;
        let credits: Credits = self
            .get_json(self.build_url(&credits_path, &[]), &credits_path)
            .await?;

        Ok(Movie::from_details(details, &credits))
    }

    /// One title lookup per keyword, issued concurrently.
    ///
    /// Failed and empty lookups are dropped; surviving movies keep keyword order.
    pub async fn movies_for_keywords(&self, keywords: &[&str]) -> Vec<Movie> {
        let lookups = keywords.iter().map(|kw| self.search_movie_by_title(kw));
        let results = join_all(lookups).await;

        keywords
            .iter()
            .zip(results)
            .filter_map(|(keyword, result)| match result {
                Ok(movie) => movie,
                Err(e) => {
                    tracing::warn!(keyword, error = %e, "keyword lookup failed; skipping");
                    None
                }
            })
            .collect()
    }

    /// Builds a request URL under the base with `api_key`, `language` and any
    /// extra query parameters, all percent-encoded by [`Url::query_pairs_mut`].
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{path}", url.path());
        url.set_path(&joined);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            pairs.append_pair("language", LANGUAGE);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body.
    ///
    /// Errors carry `context` instead of the URL, which holds the API key.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, TmdbError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::UnexpectedStatus {
                status: status.as_u16(),
                context: context.to_owned(),
            });
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| TmdbError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
