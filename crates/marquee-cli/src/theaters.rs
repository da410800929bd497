//! Theater discovery command handler.
//!
//! Owns the fallback policy: a movie-specific search that fails for any
//! reason, a missing Places key included, degrades to the generic nearby
//! search.

use anyhow::Context;
use clap::{Args, ValueEnum};
use marquee_core::links::{maps_deep_link, showtimes_search_url, MapsPlatform};
use marquee_core::{AppConfig, Coordinate, FixedLocation, LocationProvider, TheaterRecord};
use marquee_locator::{LocatorError, LocatorSettings, TheaterLocator};

#[derive(Debug, Args)]
pub struct TheatersArgs {
    /// Latitude of the search origin (needs --lon)
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,
    /// Longitude of the search origin (needs --lat)
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,
    /// Prefer theaters likely showing this title
    #[arg(long)]
    pub movie: Option<String>,
    /// Search radius in meters (overrides the configured default)
    #[arg(long)]
    pub radius: Option<u32>,
    /// Print raw records as JSON
    #[arg(long)]
    pub json: bool,
    /// Maps app the deep links target
    #[arg(long, value_enum, default_value_t = Platform::Android)]
    pub platform: Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Ios,
    Android,
}

impl From<Platform> for MapsPlatform {
    fn from(p: Platform) -> Self {
        match p {
            Platform::Ios => MapsPlatform::Ios,
            Platform::Android => MapsPlatform::Android,
        }
    }
}

/// Which search produced the list, for the caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchKind {
    ShowingMovie,
    Nearby,
}

/// Resolve the origin, run the search, and print the results.
///
/// # Errors
///
/// Returns an error when no origin is available (location permission denied),
/// when the locator cannot be built, or when the final search fails.
pub(crate) async fn run_theaters(config: &AppConfig, args: &TheatersArgs) -> anyhow::Result<()> {
    let origin = FixedLocation::resolve(args.lat, args.lon, config.home_location)
        .current_location()
        .map_err(LocatorError::from)
        .context("pass --lat/--lon or set MARQUEE_HOME_LAT/MARQUEE_HOME_LON")?;
    let locator = TheaterLocator::new(LocatorSettings::from_app_config(config))?;

    let nearby_radius = args.radius.unwrap_or(config.nearby_radius_m);
    let showtimes_radius = args.radius.unwrap_or(config.showtimes_radius_m);
    let (kind, theaters) = find_theaters(
        &locator,
        args.movie.as_deref(),
        origin,
        nearby_radius,
        showtimes_radius,
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&theaters)?);
        return Ok(());
    }

    let movie = args.movie.as_deref().filter(|m| !m.trim().is_empty());
    match (kind, movie) {
        (SearchKind::ShowingMovie, Some(title)) => {
            println!("{} theaters likely showing {title}:", theaters.len());
        }
        (SearchKind::Nearby, Some(title)) => println!(
            "Could not match theaters to {title}; showing {} nearby theaters instead:",
            theaters.len()
        ),
        (_, None) => println!("{} theaters nearby:", theaters.len()),
    }
    println!();
    for theater in &theaters {
        print_theater(theater, movie, args.platform.into());
    }
    Ok(())
}

/// Movie-specific search first when a title is given, generic search otherwise
/// or on any failure of the former.
///
/// # Errors
///
/// Returns the generic search's [`LocatorError`] when that fails too.
pub(crate) async fn find_theaters(
    locator: &TheaterLocator,
    movie: Option<&str>,
    origin: Coordinate,
    nearby_radius: u32,
    showtimes_radius: u32,
) -> Result<(SearchKind, Vec<TheaterRecord>), LocatorError> {
    if let Some(title) = movie.map(str::trim).filter(|t| !t.is_empty()) {
        if locator.has_places_credential() {
            match locator
                .find_theaters_showing_movie(
                    title,
                    origin.latitude,
                    origin.longitude,
                    showtimes_radius,
                )
                .await
            {
                Ok(theaters) => return Ok((SearchKind::ShowingMovie, theaters)),
                Err(e) => {
                    tracing::warn!(movie = title, error = %e, "movie search failed; using nearby search");
                }
            }
        } else {
            tracing::info!(movie = title, "no Google Places key configured; using nearby search");
        }
    }

    let theaters = locator
        .find_nearby_theaters(origin.latitude, origin.longitude, nearby_radius)
        .await?;
    Ok((SearchKind::Nearby, theaters))
}

fn print_theater(theater: &TheaterRecord, movie: Option<&str>, platform: MapsPlatform) {
    println!("{}  ({} km)", theater.name, theater.distance);
    println!("    {}", theater.address);

    let open = match theater.is_open {
        Some(true) => "Open now",
        Some(false) => "Closed",
        None => "Hours unknown",
    };
    if theater.has_rating() {
        println!("    Rating {}  {open}", theater.rating);
    } else {
        println!("    {open}");
    }

    println!(
        "    Directions: {}",
        maps_deep_link(platform, &theater.name, theater.latitude, theater.longitude)
    );
    if let Some(url) = &theater.maps_url {
        println!("    Map:        {url}");
    }
    if let Some(title) = movie {
        println!("    Showtimes:  {}", showtimes_search_url(title, &theater.name));
    }
    println!();
}
