//! Local accounts, the login session and per-user favourites.
//!
//! Credentials are matched as plain strings; nothing here is meant to be
//! secure. The session holds a full copy of the logged-in user, so every
//! favourites change is written to both the session and the users list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kv::JsonStore;
use crate::{StoreError, SESSION_KEY, USERS_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub favourites: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl User {
    #[must_use]
    pub fn has_favourite(&self, title: &str) -> bool {
        self.favourites.iter().any(|f| f == title)
    }
}

#[derive(Debug, Clone)]
pub struct AccountStore {
    kv: JsonStore,
}

impl AccountStore {
    #[must_use]
    pub fn new(kv: JsonStore) -> Self {
        Self { kv }
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing file cannot be read.
    pub fn users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.kv.get_item(USERS_KEY)?.unwrap_or_default())
    }

    /// Creates an account. Does not log it in.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingField`] if any argument is empty.
    /// - [`StoreError::UsernameTaken`] if the username is already registered.
    pub fn register(&self, name: &str, username: &str, password: &str) -> Result<User, StoreError> {
        require("name", name)?;
        require("username", username)?;
        require("password", password)?;

        let mut users = self.users()?;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::UsernameTaken(username.to_owned()));
        }

        let user = User {
            name: name.to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
            favourites: Vec::new(),
            registered_at: Some(Utc::now()),
        };
        users.push(user.clone());
        self.kv.set_item(USERS_KEY, &users)?;
        tracing::info!(username, "registered user");
        Ok(user)
    }

    /// # Errors
    ///
    /// - [`StoreError::MissingField`] if either argument is empty.
    /// - [`StoreError::InvalidCredentials`] unless both match one account exactly.
    pub fn login(&self, username: &str, password: &str) -> Result<User, StoreError> {
        require("username", username)?;
        require("password", password)?;

        let user = self
            .users()?
            .into_iter()
            .find(|u| u.username == username && u.password == password)
            .ok_or(StoreError::InvalidCredentials)?;

        self.kv.set_item(SESSION_KEY, &user)?;
        tracing::info!(username, "logged in");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing file cannot be rewritten.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.kv.remove_item(SESSION_KEY)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing file cannot be read.
    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        self.kv.get_item(SESSION_KEY)
    }

    /// # Errors
    ///
    /// - [`StoreError::NotLoggedIn`] without a session.
    /// - [`StoreError::AlreadyFavourite`] if the title is already saved.
    pub fn add_favourite(&self, title: &str) -> Result<User, StoreError> {
        let mut user = self.current_user()?.ok_or(StoreError::NotLoggedIn)?;
        if user.has_favourite(title) {
            return Err(StoreError::AlreadyFavourite(title.to_owned()));
        }
        user.favourites.push(title.to_owned());
        self.update_logged_in_user(&user)?;
        Ok(user)
    }

    /// Removes every entry equal to `title`. Absent titles are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotLoggedIn`] without a session.
    pub fn remove_favourite(&self, title: &str) -> Result<User, StoreError> {
        let mut user = self.current_user()?.ok_or(StoreError::NotLoggedIn)?;
        user.favourites.retain(|f| f != title);
        self.update_logged_in_user(&user)?;
        Ok(user)
    }

    fn update_logged_in_user(&self, user: &User) -> Result<(), StoreError> {
        self.kv.set_item(SESSION_KEY, user)?;
        let users: Vec<User> = self
            .users()?
            .into_iter()
            .map(|u| {
                if u.username == user.username {
                    user.clone()
                } else {
                    u
                }
            })
            .collect();
        self.kv.set_item(USERS_KEY, &users)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(StoreError::MissingField(field));
    }
    Ok(())
}
