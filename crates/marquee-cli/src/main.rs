mod account;
mod movies;
mod theaters;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::account::FavouritesCommands;
use crate::theaters::TheatersArgs;

#[derive(Debug, Parser)]
#[command(name = "marquee")]
#[command(about = "Find movies, keep favourites and locate nearby theaters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a local account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log in to a local account
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user and their favourites
    Profile,
    /// Manage favourite titles
    Favourites {
        #[command(subcommand)]
        command: FavouritesCommands,
    },
    /// Look up a movie by title
    Search {
        title: String,
        /// Also add the found movie to favourites
        #[arg(long)]
        save: bool,
    },
    /// List browse categories
    Categories,
    /// Show recommended movies for a category
    Browse {
        /// Category id (defaults to "popular")
        category: Option<String>,
    },
    /// Find theaters near a location, optionally ones showing a movie
    Theaters(TheatersArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = marquee_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let store = marquee_store::AccountStore::new(marquee_store::JsonStore::new(
        config.store_path.clone(),
    ));

    match cli.command {
        Commands::Register {
            name,
            username,
            password,
        } => account::run_register(&store, &name, &username, &password)?,
        Commands::Login { username, password } => account::run_login(&store, &username, &password)?,
        Commands::Logout => account::run_logout(&store)?,
        Commands::Profile => account::run_profile(&store)?,
        Commands::Favourites { command } => account::run_favourites(&store, command)?,
        Commands::Search { title, save } => movies::run_search(&config, &store, &title, save).await?,
        Commands::Categories => movies::run_categories(),
        Commands::Browse { category } => movies::run_browse(&config, category.as_deref()).await?,
        Commands::Theaters(args) => theaters::run_theaters(&config, &args).await?,
    }

    Ok(())
}
