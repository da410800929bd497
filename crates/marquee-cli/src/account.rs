//! Account, session and favourites command handlers.

use clap::Subcommand;
use marquee_store::{AccountStore, StoreError};

/// Sub-commands available under `favourites`.
#[derive(Debug, Subcommand)]
pub enum FavouritesCommands {
    /// List saved titles
    List,
    /// Save a title
    Add { title: String },
    /// Remove a saved title
    Remove { title: String },
}

pub(crate) fn run_register(
    store: &AccountStore,
    name: &str,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let user = store.register(name, username, password)?;
    println!(
        "Registration successful! Log in with `marquee login --username {}`.",
        user.username
    );
    Ok(())
}

pub(crate) fn run_login(store: &AccountStore, username: &str, password: &str) -> anyhow::Result<()> {
    let user = store.login(username, password)?;
    println!("Welcome back, {}!", user.name);
    Ok(())
}

pub(crate) fn run_logout(store: &AccountStore) -> anyhow::Result<()> {
    store.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Print the session user. Not being logged in is reported, not an error.
pub(crate) fn run_profile(store: &AccountStore) -> anyhow::Result<()> {
    let Some(user) = store.current_user()? else {
        println!("Not logged in.");
        return Ok(());
    };

    println!("Name:     {}", user.name);
    println!("Username: {}", user.username);
    if let Some(at) = user.registered_at {
        println!("Member since {}", at.format("%Y-%m-%d"));
    }
    println!();
    print_favourites(&user.favourites);
    Ok(())
}

pub(crate) fn run_favourites(store: &AccountStore, command: FavouritesCommands) -> anyhow::Result<()> {
    match command {
        FavouritesCommands::List => {
            let user = store.current_user()?.ok_or(StoreError::NotLoggedIn)?;
            print_favourites(&user.favourites);
        }
        FavouritesCommands::Add { title } => {
            store.add_favourite(&title)?;
            println!("Added to favourites: {title}");
        }
        FavouritesCommands::Remove { title } => {
            store.remove_favourite(&title)?;
            println!("Removed from favourites: {title}");
        }
    }
    Ok(())
}

fn print_favourites(favourites: &[String]) {
    if favourites.is_empty() {
        println!("No favourites yet. Save one with `marquee favourites add <title>`.");
        return;
    }
    println!("Favourites ({}):", favourites.len());
    for title in favourites {
        println!("  - {title}");
    }
}
