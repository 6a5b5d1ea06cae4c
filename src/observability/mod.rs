//! Observability: structured JSON logging for server and console events.

mod logger;

pub use logger::{Logger, Severity};
