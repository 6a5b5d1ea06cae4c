//! CLI module for inventario
//!
//! Provides the command-line interface:
//! - serve: boot the web server over the configured data directory
//! - console: interactive product menu against the same files

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{console, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{print_table, prompt, prompt_with_default};
