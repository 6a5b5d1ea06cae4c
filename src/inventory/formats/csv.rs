//! CSV codec.
//!
//! Header-labeled rows, column order `id,nombre,descripcion,precio,cantidad`,
//! UTF-8. Loading is lenient: blank numeric fields coerce to zero and any
//! row that fails coercion is skipped rather than failing the load.

use std::path::Path;

use serde::Deserialize;

use crate::inventory::errors::InventoryResult;
use crate::inventory::product::Product;

use super::Format;

/// Rows are read as raw strings first so coercion failures can be
/// skipped per row instead of aborting the whole read.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    nombre: String,
    #[serde(default)]
    descripcion: String,
    #[serde(default)]
    precio: String,
    #[serde(default)]
    cantidad: String,
}

impl RawRow {
    /// Coerce to a product. Blank numerics default to zero; anything
    /// non-coercible rejects the row.
    fn coerce(self) -> Option<Product> {
        Some(Product {
            id: parse_or_zero(&self.id)?,
            nombre: self.nombre,
            descripcion: self.descripcion,
            precio: parse_or_zero(&self.precio)?,
            cantidad: parse_or_zero(&self.cantidad)?,
        })
    }
}

fn parse_or_zero<T: std::str::FromStr + Default>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(T::default());
    }
    raw.parse().ok()
}

const HEADERS: [&str; 5] = ["id", "nombre", "descripcion", "precio", "cantidad"];

/// The CSV persistence strategy
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvFormat;

impl Format for CsvFormat {
    fn load(&self, path: &Path) -> InventoryResult<Vec<Product>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut products = Vec::new();

        for row in reader.deserialize::<RawRow>() {
            // Lenient policy: a row that does not deserialize or does
            // not coerce is dropped, the rest of the file still loads.
            let Ok(raw) = row else { continue };
            if let Some(product) = raw.coerce() {
                products.push(product);
            }
        }

        Ok(products)
    }

    fn save(&self, path: &Path, products: &[Product]) -> InventoryResult<()> {
        // Header goes out explicitly so an empty store still produces a
        // well-formed file instead of zero bytes.
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(HEADERS)?;
        for product in products {
            writer.serialize(product)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                nombre: "Tornillo".to_string(),
                descripcion: "M4 x 20".to_string(),
                precio: 0.15,
                cantidad: 500,
            },
            Product {
                id: 2,
                nombre: "Taladro".to_string(),
                descripcion: String::new(),
                precio: 89.9,
                cantidad: 3,
            },
        ]
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.csv");

        CsvFormat.save(&path, &sample()).unwrap();
        let loaded = CsvFormat.load(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_header_row_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.csv");

        CsvFormat.save(&path, &sample()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("id,nombre,descripcion,precio,cantidad"));
    }

    #[test]
    fn test_empty_save_still_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.csv");

        CsvFormat.save(&path, &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), "id,nombre,descripcion,precio,cantidad");
        assert!(CsvFormat.load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_row_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.csv");
        std::fs::write(
            &path,
            "id,nombre,descripcion,precio,cantidad\n\
             1,Bueno,,2.5,10\n\
             x,Malo,,not-a-price,oops\n\
             2,Tambien,,1.0,1\n",
        )
        .unwrap();

        let loaded = CsvFormat.load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].nombre, "Bueno");
        assert_eq!(loaded[1].id, 2);
    }

    #[test]
    fn test_blank_numerics_default_to_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.csv");
        std::fs::write(
            &path,
            "id,nombre,descripcion,precio,cantidad\n,SinNumeros,,,\n",
        )
        .unwrap();

        let loaded = CsvFormat.load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 0);
        assert_eq!(loaded[0].precio, 0.0);
        assert_eq!(loaded[0].cantidad, 0);
    }

    #[test]
    fn test_utf8_values_survive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.csv");
        let products = vec![Product {
            id: 1,
            nombre: "Cañería".to_string(),
            descripcion: "für die Küche".to_string(),
            precio: 3.5,
            cantidad: 7,
        }];

        CsvFormat.save(&path, &products).unwrap();
        assert_eq!(CsvFormat.load(&path).unwrap(), products);
    }
}
