pub mod app_config;
pub mod config;
pub mod geo;
pub mod links;
pub mod location;
pub mod theater;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use location::{FixedLocation, LocationError, LocationProvider};
pub use theater::{
    format_one_decimal, sort_by_distance, TheaterRecord, ADDRESS_PLACEHOLDER,
    DEFAULT_NEARBY_RADIUS_M, DEFAULT_SHOWTIMES_RADIUS_M, RATING_PLACEHOLDER,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
