//! Shared application state for the web surface.
//!
//! One inventory store, one user repository and one session store per
//! process. The store is behind a mutex: every mutating request
//! rewrites the three files inline, so requests serialize on it.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderMap};

use crate::auth::{JsonUserRepository, PasswordPolicy, Session, SessionStore, UserRepository};
use crate::inventory::{Inventory, InventoryResult};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "sesion";

/// Shared state handed to every handler
pub struct AppState {
    pub store: Mutex<Inventory>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: SessionStore,
    pub policy: PasswordPolicy,
}

impl AppState {
    /// Open state over a data directory: the inventory store plus the
    /// JSON user file, both under the same directory.
    pub fn open(data_dir: &Path) -> InventoryResult<Self> {
        let store = Inventory::open(data_dir)?;
        let users = JsonUserRepository::open(data_dir)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

        Ok(Self {
            store: Mutex::new(store),
            users: Arc::new(users),
            sessions: SessionStore::default(),
            policy: PasswordPolicy::default(),
        })
    }

    /// Resolve the session cookie from request headers, if any.
    pub fn session_from_headers(&self, headers: &HeaderMap) -> Option<Session> {
        let token = cookie_token(headers)?;
        self.sessions.resolve(token).ok()
    }
}

/// Extract the raw session token from the `Cookie` header, if present.
pub fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|part| {
        part.trim()
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
    })
}
