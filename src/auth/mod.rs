//! Authentication subsystem: users, sessions and crypto.
//!
//! Users persist to a JSON file in the data directory; sessions are
//! in-memory cookie tokens. Passwords are stored as Argon2id hashes
//! only.

mod crypto;
mod errors;
mod session;
mod user;

pub use crypto::{
    constant_time_str_eq, generate_token, hash_password, hash_token, verify_password,
    PasswordPolicy,
};
pub use errors::{AuthError, AuthResult};
pub use session::{Session, SessionStore};
pub use user::{InMemoryUserRepository, JsonUserRepository, User, UserRepository, USERS_FILE};
