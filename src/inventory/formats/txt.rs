//! Delimited text codec.
//!
//! One `id|nombre|descripcion|precio|cantidad` line per product. Values
//! containing `|` are not escaped; such a row corrupts on reload, which
//! is an accepted limitation of the format. Loading is lenient: blank
//! lines, lines with fewer than five fields and lines with
//! non-coercible numeric fields are skipped.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::inventory::errors::InventoryResult;
use crate::inventory::product::Product;

use super::Format;

const SEPARATOR: char = '|';

/// The plain-text persistence strategy
#[derive(Debug, Default, Clone, Copy)]
pub struct TxtFormat;

impl Format for TxtFormat {
    fn load(&self, path: &Path) -> InventoryResult<Vec<Product>> {
        let contents = fs::read_to_string(path)?;
        let mut products = Vec::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(product) = parse_line(line) {
                products.push(product);
            }
        }

        Ok(products)
    }

    fn save(&self, path: &Path, products: &[Product]) -> InventoryResult<()> {
        let mut file = fs::File::create(path)?;
        for p in products {
            writeln!(
                file,
                "{}{sep}{}{sep}{}{sep}{}{sep}{}",
                p.id,
                p.nombre,
                p.descripcion,
                p.precio,
                p.cantidad,
                sep = SEPARATOR
            )?;
        }
        Ok(())
    }
}

/// Parse one line into a product, or reject it (lenient policy).
/// Only the first five fields are read; trailing fields are ignored.
fn parse_line(line: &str) -> Option<Product> {
    let parts: Vec<&str> = line.split(SEPARATOR).collect();
    if parts.len() < 5 {
        return None;
    }

    Some(Product {
        id: parts[0].parse().ok()?,
        nombre: parts[1].to_string(),
        descripcion: parts[2].to_string(),
        precio: parts[3].parse().ok()?,
        cantidad: parts[4].parse().ok()?,
    })
}
