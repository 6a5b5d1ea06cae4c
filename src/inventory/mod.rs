//! File-backed Inventory Store subsystem.
//!
//! Holds an ordered collection of [`Product`] records in memory and
//! synchronizes it to three interchangeable on-disk representations
//! (CSV, JSON, delimited text) on every mutation.
//!
//! # Invariants Enforced
//!
//! - Unique, never-reused product ids within one store
//! - Memory is canonical; files are redundant derived encodings
//! - CSV > JSON > TXT seed priority at open
//! - Not-found on update/delete is a boolean signal, not an error

mod errors;
mod formats;
mod product;
mod store;

pub use errors::{InventoryError, InventoryResult};
pub use formats::{CsvFormat, Format, JsonFormat, TxtFormat};
pub use product::{NewProduct, Product, ProductPatch};
pub use store::{Inventory, CSV_FILE, JSON_FILE, TXT_FILE};
