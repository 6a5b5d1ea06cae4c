//! # Auth Errors
//!
//! Error types for user registration, login and session handling.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Wrong email or password (generic - don't leak which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email already registered")]
    EmailAlreadyExists,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Session not found, expired or revoked
    #[error("Session expired or invalid")]
    SessionInvalid,

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::WeakPassword(_) => 400,
            AuthError::InvalidCredentials => 401,
            AuthError::SessionInvalid => 401,
            AuthError::EmailAlreadyExists => 409,
            AuthError::HashingFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }
}
