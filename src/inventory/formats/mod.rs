//! On-disk format codecs for the inventory store.
//!
//! Each format implements the [`Format`] seam so the store can treat
//! persistence as an interchangeable strategy and each codec can be
//! tested against a bare path, off the store.
//!
//! Load policies differ deliberately (kept for compatibility with
//! existing data files):
//! - CSV: lenient — malformed rows are skipped, blank numerics coerce to 0
//! - JSON: strict — a malformed document fails the whole load
//! - TXT: lenient — short or non-coercible lines are skipped

mod csv;
mod json;
mod txt;

use std::path::Path;

use super::errors::InventoryResult;
use super::product::Product;

pub use self::csv::CsvFormat;
pub use self::json::JsonFormat;
pub use self::txt::TxtFormat;

/// A persistence strategy for one on-disk representation.
pub trait Format {
    /// Read every product the file yields under this format's load policy.
    fn load(&self, path: &Path) -> InventoryResult<Vec<Product>>;

    /// Rewrite the file in full from the given products.
    fn save(&self, path: &Path, products: &[Product]) -> InventoryResult<()>;
}
