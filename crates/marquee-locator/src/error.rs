use marquee_core::LocationError;
use thiserror::Error;

pub(crate) const SEARCH_TIMED_OUT: &str = "Theater search timed out. Please try again.";
pub(crate) const SEARCH_UNAVAILABLE: &str =
    "Unable to find theaters right now. Please try again later.";
pub(crate) const NONE_NEARBY: &str = "No theaters found nearby";
pub(crate) const NONE_FOR_MOVIE: &str = "No theaters found for this movie nearby";
pub(crate) const SHOWTIMES_UNAVAILABLE: &str =
    "Unable to find showtimes theaters right now. Please try again later.";

/// Errors surfaced to callers of the theater locator.
///
/// Every message is display-ready; raw provider errors never leak through.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The location capability refused to supply a position.
    #[error("Location permission denied")]
    PermissionDenied,

    /// No usable result after exhausting every endpoint or strategy.
    #[error("{0}")]
    TheaterSearchFailed(String),

    /// The Google Places path was invoked without an API key.
    #[error("Google Places API key missing. Set MARQUEE_GOOGLE_PLACES_API_KEY")]
    MissingCredential,

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

impl LocatorError {
    pub(crate) fn search_failed(message: &str) -> Self {
        Self::TheaterSearchFailed(message.to_string())
    }
}

impl From<LocationError> for LocatorError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => Self::PermissionDenied,
        }
    }
}

/// Why a single request attempt failed. Recorded as the "last error" and
/// never surfaced on its own.
#[derive(Debug, Error)]
pub(crate) enum AttemptError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("transport error from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("provider status {status} from {url}")]
    ProviderStatus { status: String, url: String },
}

impl AttemptError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_owned(),
            }
        } else {
            Self::Transport {
                url: url.to_owned(),
                source: source.without_url(),
            }
        }
    }

    pub(crate) fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
