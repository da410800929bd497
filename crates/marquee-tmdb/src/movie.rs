//! App-facing movie record built from TMDB details and credits.

use marquee_core::format_one_decimal;
use serde::Serialize;

use crate::types::{Credits, MovieDetails};

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const NOT_AVAILABLE: &str = "N/A";
const NO_OVERVIEW: &str = "No overview available";

/// Display-ready movie. Missing values are already replaced by placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub title: String,
    pub poster_url: Option<String>,
    /// One decimal, or `"N/A"` when TMDB has no (or a zero) vote average.
    pub rating: String,
    /// Comma-joined genre names, or `"N/A"`.
    pub genres: String,
    pub plot: String,
    pub director: String,
    /// Release date as TMDB reports it; may be empty.
    pub year: String,
    pub tmdb_id: u64,
}

impl Movie {
    #[must_use]
    pub fn from_details(details: MovieDetails, credits: &Credits) -> Self {
        let director = credits
            .crew
            .iter()
            .find(|member| member.job.as_deref() == Some("Director"))
            .and_then(|member| member.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let genres = details
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let rating = details
            .vote_average
            .filter(|v| v.is_finite() && v.abs() > f64::EPSILON)
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_one_decimal);

        Self {
            title: details
                .title
                .or(details.name)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            poster_url: details
                .poster_path
                .filter(|p| !p.is_empty())
                .map(|p| format!("{IMAGE_BASE_URL}{p}")),
            rating,
            genres: if genres.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                genres
            },
            plot: details
                .overview
                .filter(|o| !o.is_empty())
                .unwrap_or_else(|| NO_OVERVIEW.to_string()),
            director,
            year: details.release_date.unwrap_or_default(),
            tmdb_id: details.id,
        }
    }
}
