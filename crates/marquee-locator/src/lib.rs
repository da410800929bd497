//! Theater discovery.
//!
//! Finds cinemas near a coordinate through the free Overpass API, trying each
//! configured interpreter endpoint in order, and finds theaters likely showing
//! a given title through Google Places when a key is configured. Both paths
//! normalize into [`marquee_core::TheaterRecord`] sorted by distance.

pub mod error;
mod fetch;
pub mod locator;
pub mod overpass;
pub mod places;

pub use error::LocatorError;
pub use locator::{LocatorSettings, TheaterLocator};
