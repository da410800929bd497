//! Local persistence: a JSON-file key-value store plus the accounts, login
//! session and favourites built on top of it.

use std::path::PathBuf;

use thiserror::Error;

pub mod accounts;
pub mod kv;

pub use accounts::{AccountStore, User};
pub use kv::JsonStore;

/// Key holding the registered users list.
pub const USERS_KEY: &str = "users";
/// Key holding a copy of the logged-in user.
pub const SESSION_KEY: &str = "loggedInUser";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Please fill all fields ({0} is empty)")]
    MissingField(&'static str),
    #[error("Username already exists: {0}")]
    UsernameTaken(String),
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("Please log in first")]
    NotLoggedIn,
    #[error("Already in favourites: {0}")]
    AlreadyFavourite(String),
}
