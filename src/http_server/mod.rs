//! Web surface: session-cookie-gated CRUD over products plus
//! registration, login and logout, all as plain form submission and
//! redirects.

mod auth_routes;
mod config;
mod product_routes;
mod server;
mod state;
mod templates;

pub use auth_routes::auth_routes;
pub use config::HttpConfig;
pub use product_routes::product_routes;
pub use server::HttpServer;
pub use state::{cookie_token, AppState, SESSION_COOKIE};
