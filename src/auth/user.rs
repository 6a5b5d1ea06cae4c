//! # User Management
//!
//! User model and repository for the web surface. Users live in a JSON
//! file inside the data directory (`usuarios.json`), next to the
//! product files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password, PasswordPolicy};
use super::errors::{AuthError, AuthResult};

/// User file name inside the data directory
pub const USERS_FILE: &str = "usuarios.json";

/// A registered user.
///
/// `password_hash` serializes on purpose: the repository file is the
/// user table. Response types never expose it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Display name
    pub nombre: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2id password hash (never plaintext)
    pub password_hash: String,

    /// When the user registered
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a validated, hashed password
    pub fn new(
        nombre: String,
        email: String,
        password: &str,
        policy: &PasswordPolicy,
    ) -> AuthResult<Self> {
        policy.validate(password)?;
        let password_hash = hash_password(password)?;

        Ok(Self {
            id: Uuid::new_v4(),
            nombre,
            email,
            password_hash,
            created_at: Utc::now(),
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }
}

/// User repository trait
///
/// Abstracts storage operations for users so handlers can run against
/// the in-memory implementation in tests.
pub trait UserRepository: Send + Sync {
    /// Find a user by their ID
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    /// Find a user by their email
    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Create a new user (rejects duplicate emails)
    fn create(&self, user: &User) -> AuthResult<()>;

    /// All users in registration order
    fn list(&self) -> AuthResult<Vec<User>>;
}

/// In-memory user repository for testing
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        users.push(user.clone());
        Ok(())
    }

    fn list(&self) -> AuthResult<Vec<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.clone())
    }
}

/// JSON-file-backed user repository.
///
/// The whole file is rewritten on every create, mirroring the inventory
/// store's full-overwrite model. Single-process access assumed.
#[derive(Debug)]
pub struct JsonUserRepository {
    path: PathBuf,
    users: RwLock<Vec<User>>,
}

impl JsonUserRepository {
    /// Open the repository, loading existing users when the file exists.
    pub fn open(data_dir: &Path) -> AuthResult<Self> {
        let path = data_dir.join(USERS_FILE);

        let users = if path.exists() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| AuthError::StorageError(e.to_string()))?;
            serde_json::from_str(&contents)
                .map_err(|e| AuthError::StorageError(e.to_string()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    fn persist(&self, users: &[User]) -> AuthResult<()> {
        let contents = serde_json::to_string_pretty(users)
            .map_err(|e| AuthError::StorageError(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| AuthError::StorageError(e.to_string()))
    }
}

impl UserRepository for JsonUserRepository {
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        users.push(user.clone());
        self.persist(&users)
    }

    fn list(&self) -> AuthResult<Vec<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.clone())
    }
}
