//! CLI argument definitions using clap
//!
//! Commands:
//! - inventario serve --config <path>
//! - inventario console --data-dir <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// inventario - multi-user inventory management over a file-backed store
#[derive(Parser, Debug)]
#[command(name = "inventario")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the inventory web server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./inventario.json")]
        config: PathBuf,
    },

    /// Run the interactive console inventory tool
    Console {
        /// Directory holding the product files
        #[arg(long, default_value = "./datos")]
        data_dir: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
