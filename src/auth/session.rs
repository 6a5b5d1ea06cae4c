//! # Session Management
//!
//! Cookie-backed sessions for the web surface. Sessions live in process
//! memory and are keyed by the SHA-256 hash of the random cookie token;
//! the raw token only ever travels in the client cookie.
//!
//! ## Invariants
//! - Sessions expire at their stated time
//! - Logout invalidates immediately

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::crypto::{constant_time_str_eq, generate_token, hash_token};
use super::errors::{AuthError, AuthResult};

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,

    /// User this session belongs to
    pub user_id: Uuid,

    /// Display name, cached for rendering
    pub user_name: String,

    /// Hashed cookie token (raw token given to the client)
    token_hash: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

/// In-memory session store.
///
/// Sessions do not survive a process restart, matching the
/// single-process assumption of the rest of the system.
pub struct SessionStore {
    sessions: RwLock<Vec<Session>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(12))
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(Vec::new()),
            ttl,
        }
    }

    /// Create a session for a user. Returns the raw cookie token.
    pub fn create(&self, user_id: Uuid, user_name: String) -> AuthResult<String> {
        let token = generate_token();
        let now = Utc::now();

        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            user_name,
            token_hash: hash_token(&token),
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        sessions.push(session);

        Ok(token)
    }

    /// Resolve a raw cookie token to its session. Expired or unknown
    /// tokens are invalid.
    pub fn resolve(&self, token: &str) -> AuthResult<Session> {
        let token_hash = hash_token(token);

        let sessions = self
            .sessions
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        let session = sessions
            .iter()
            .find(|s| constant_time_str_eq(&s.token_hash, &token_hash))
            .ok_or(AuthError::SessionInvalid)?;

        if session.expires_at < Utc::now() {
            return Err(AuthError::SessionInvalid);
        }

        Ok(session.clone())
    }

    /// Remove the session for a raw cookie token (logout).
    ///
    /// Revocation is immediate; unknown tokens are a no-op so logout
    /// never fails for the client.
    pub fn revoke(&self, token: &str) -> AuthResult<()> {
        let token_hash = hash_token(token);

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        sessions.retain(|s| !constant_time_str_eq(&s.token_hash, &token_hash));

        Ok(())
    }

    /// Drop expired sessions. Returns how many were removed.
    pub fn purge_expired(&self) -> AuthResult<usize> {
        let now = Utc::now();

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        let before = sessions.len();
        sessions.retain(|s| s.expires_at > now);

        Ok(before - sessions.len())
    }
}
