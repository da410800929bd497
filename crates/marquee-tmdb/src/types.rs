//! TMDB response types.
//!
//! Only the fields the app reads are modelled; everything else is ignored.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// /search/movie
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One hit from `/search/movie`. Only the id is needed to resolve details.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// /movie/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    /// TV-shaped payloads carry `name` instead of `title`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Genre {
    pub name: String,
}

// ---------------------------------------------------------------------------
// /movie/{id}/credits
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct CrewMember {
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
