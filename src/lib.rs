//! inventario - multi-user inventory management over a file-backed
//! product store.
//!
//! The core is the [`inventory`] store: an in-memory product collection
//! synchronized to CSV, JSON and delimited-text files on every
//! mutation. Two surfaces sit on top of it: a session-gated web
//! application ([`http_server`]) and an interactive console tool
//! ([`cli`]).

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod inventory;
pub mod observability;
