//! CLI-specific error types
//!
//! Anything that reaches `main` through these is fatal: the process
//! prints the error and exits non-zero. Menu-level mistakes (bad
//! numbers, unknown ids) are printed and never become a `CliError`.

use std::fmt;
use std::io;

use crate::inventory::InventoryError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Inventory store failure
    StoreError,
    /// Server boot failed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "INV_CLI_CONFIG_ERROR",
            Self::IoError => "INV_CLI_IO_ERROR",
            Self::StoreError => "INV_CLI_STORE_ERROR",
            Self::BootFailed => "INV_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn store_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StoreError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<InventoryError> for CliError {
    fn from(e: InventoryError) -> Self {
        Self::store_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_message() {
        let err = CliError::config_error("bad json");
        assert_eq!(err.to_string(), "INV_CLI_CONFIG_ERROR: bad json");
    }

    #[test]
    fn test_inventory_error_converts() {
        let err: CliError = InventoryError::invalid_field("precio", "x").into();
        assert_eq!(err.code(), &CliErrorCode::StoreError);
    }
}
