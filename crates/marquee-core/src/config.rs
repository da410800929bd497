use crate::app_config::AppConfig;
use crate::geo::Coordinate;
use crate::theater::{DEFAULT_NEARBY_RADIUS_M, DEFAULT_SHOWTIMES_RADIUS_M};
use crate::ConfigError;

const DEFAULT_OVERPASS_ENDPOINTS: &str =
    "https://overpass.kumi.systems/api/interpreter,https://overpass-api.de/api/interpreter";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty values count as unset so `.env` templates can leave keys blank.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        let Some(raw) = optional(var) else {
            return Ok(default);
        };
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        optional(var)
            .map(|raw| {
                raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    };

    let log_level = or_default("MARQUEE_LOG_LEVEL", "info");
    let store_path = PathBuf::from(or_default("MARQUEE_STORE_PATH", "./marquee-store.json"));

    let overpass_endpoints = parse_endpoint_list(&or_default(
        "MARQUEE_OVERPASS_ENDPOINTS",
        DEFAULT_OVERPASS_ENDPOINTS,
    ));
    if overpass_endpoints.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "MARQUEE_OVERPASS_ENDPOINTS".to_string(),
            reason: "at least one endpoint URL is required".to_string(),
        });
    }

    let google_places_api_key = optional("MARQUEE_GOOGLE_PLACES_API_KEY");
    let places_base_url = or_default(
        "MARQUEE_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/place",
    );
    let tmdb_api_key = optional("MARQUEE_TMDB_API_KEY");
    let tmdb_base_url = or_default("MARQUEE_TMDB_BASE_URL", "https://api.themoviedb.org/3");

    let request_timeout_secs = parse_u64("MARQUEE_REQUEST_TIMEOUT_SECS", "12")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MARQUEE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("MARQUEE_USER_AGENT", "marquee/0.1 (theater-locator)");
    let nearby_radius_m = parse_u32("MARQUEE_NEARBY_RADIUS_M", DEFAULT_NEARBY_RADIUS_M)?;
    let showtimes_radius_m = parse_u32("MARQUEE_SHOWTIMES_RADIUS_M", DEFAULT_SHOWTIMES_RADIUS_M)?;

    let home_location = match (parse_f64("MARQUEE_HOME_LAT")?, parse_f64("MARQUEE_HOME_LON")?) {
        (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
        (None, None) => None,
        (Some(_), None) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "MARQUEE_HOME_LON".to_string(),
                reason: "must be set together with MARQUEE_HOME_LAT".to_string(),
            })
        }
        (None, Some(_)) => {
            return Err(ConfigError::InvalidEnvVar {
                var: "MARQUEE_HOME_LAT".to_string(),
                reason: "must be set together with MARQUEE_HOME_LON".to_string(),
            })
        }
    };

    Ok(AppConfig {
        log_level,
        store_path,
        overpass_endpoints,
        google_places_api_key,
        places_base_url,
        tmdb_api_key,
        tmdb_base_url,
        request_timeout_secs,
        user_agent,
        nearby_radius_m,
        showtimes_radius_m,
        home_location,
    })
}

/// Split a comma-separated URL list, dropping blanks.
fn parse_endpoint_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
