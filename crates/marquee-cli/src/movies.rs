//! Movie search and category browsing handlers.

use anyhow::Context;
use marquee_core::links::{star_rating, trailer_search_url};
use marquee_core::AppConfig;
use marquee_store::AccountStore;
use marquee_tmdb::categories::DEFAULT_CATEGORY;
use marquee_tmdb::{categories, find_category, Movie, TmdbClient};

fn tmdb_client(config: &AppConfig) -> anyhow::Result<TmdbClient> {
    let api_key = config
        .tmdb_api_key
        .as_deref()
        .context("TMDB API key missing. Set MARQUEE_TMDB_API_KEY")?;
    Ok(TmdbClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.tmdb_base_url,
        &config.user_agent,
    )?)
}

/// Look up `title` and print the best match, optionally saving it.
///
/// # Errors
///
/// Returns an error for an empty title, a missing TMDB key, a failed lookup,
/// or (with `save`) any favourites error such as not being logged in.
pub(crate) async fn run_search(
    config: &AppConfig,
    store: &AccountStore,
    title: &str,
    save: bool,
) -> anyhow::Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Please enter a movie name");
    }

    let client = tmdb_client(config)?;
    let movie = client
        .search_movie_by_title(title)
        .await
        .context("Failed to fetch movie data")?;

    let Some(movie) = movie else {
        println!("Movie not found!");
        return Ok(());
    };

    print_movie(&movie);
    if save {
        store.add_favourite(&movie.title)?;
        println!();
        println!("Added to favourites: {}", movie.title);
    }
    Ok(())
}

pub(crate) fn run_categories() {
    for category in categories() {
        println!("{:<12}{}", category.id, category.label);
    }
}

/// Resolve a category's keywords to movies and print them compactly.
///
/// # Errors
///
/// Returns an error for an unknown category id or a missing TMDB key.
/// Individual keyword failures are skipped.
pub(crate) async fn run_browse(config: &AppConfig, category: Option<&str>) -> anyhow::Result<()> {
    let id = category.unwrap_or(DEFAULT_CATEGORY);
    let Some(category) = find_category(id) else {
        let known: Vec<&str> = categories().iter().map(|c| c.id).collect();
        anyhow::bail!("unknown category '{id}'; expected one of: {}", known.join(", "));
    };

    let client = tmdb_client(config)?;
    let movies = client.movies_for_keywords(category.keywords).await;

    if movies.is_empty() {
        println!("No {} movies could be loaded right now.", category.label);
        return Ok(());
    }

    println!("Recommended {} Movies", category.label);
    println!();
    for movie in &movies {
        println!(
            "{:<40}{:<6}{:<7}{}",
            truncate(&movie.title, 38),
            release_year(&movie.year),
            movie.rating,
            movie.genres
        );
    }
    Ok(())
}

fn print_movie(movie: &Movie) {
    let year = release_year(&movie.year);
    if year.is_empty() {
        println!("{}", movie.title);
    } else {
        println!("{} ({year})", movie.title);
    }

    match movie.rating.parse::<f64>() {
        Ok(value) => println!("Rating:   {} {}/10", star_rating(value), movie.rating),
        Err(_) => println!("Rating:   {}", movie.rating),
    }
    println!("Genres:   {}", movie.genres);
    println!("Director: {}", movie.director);
    if let Some(poster) = &movie.poster_url {
        println!("Poster:   {poster}");
    }
    println!("Trailer:  {}", trailer_search_url(&movie.title));
    println!();
    println!("{}", movie.plot);
}

/// First four characters of a `YYYY-MM-DD` date, or the empty string.
fn release_year(date: &str) -> &str {
    date.get(..4).unwrap_or("")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max.saturating_sub(3)).collect::<String>())
    } else {
        s.to_string()
    }
}
