use thiserror::Error;

/// Errors returned by the TMDB client.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TMDB answered with a non-2xx status.
    #[error("TMDB error {status} for {context}")]
    UnexpectedStatus { status: u16, context: String },

    #[error("invalid TMDB base URL {0}")]
    InvalidBaseUrl(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
