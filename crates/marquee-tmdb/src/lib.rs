//! Movie metadata from The Movie Database (TMDB).
//!
//! Title search, details with credits, a concurrent per-keyword batch used by
//! category browsing, and the fixed category catalog.

pub mod categories;
pub mod client;
pub mod error;
pub mod movie;
pub mod types;

pub use categories::{categories, find_category, Category};
pub use client::TmdbClient;
pub use error::TmdbError;
pub use movie::Movie;
