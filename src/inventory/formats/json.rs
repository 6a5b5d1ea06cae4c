//! JSON codec.
//!
//! A top-level array of objects, written pretty-printed (2-space
//! indentation) with non-ASCII characters emitted literally. Loading is
//! strict: a malformed document, or any record whose fields cannot be
//! coerced, fails the whole load.

use std::fs;
use std::path::Path;

use serde::de::Error as _;
use serde_json::Value;

use crate::inventory::errors::InventoryResult;
use crate::inventory::product::Product;

use super::Format;

/// The JSON persistence strategy
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn load(&self, path: &Path) -> InventoryResult<Vec<Product>> {
        let contents = fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&contents)?;

        let records = document
            .as_array()
            .ok_or_else(|| serde_json::Error::custom("expected a top-level array"))?;

        let mut products = Vec::with_capacity(records.len());
        for record in records {
            products.push(coerce_record(record)?);
        }
        Ok(products)
    }

    fn save(&self, path: &Path, products: &[Product]) -> InventoryResult<()> {
        let contents = serde_json::to_string_pretty(products)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Coerce one array element. Missing fields take defaults, but a value
/// of the wrong shape is a hard error (strict policy).
fn coerce_record(record: &Value) -> Result<Product, serde_json::Error> {
    let obj = record
        .as_object()
        .ok_or_else(|| serde_json::Error::custom("expected an object"))?;

    Ok(Product {
        id: coerce_u32(obj.get("id"), "id")?,
        nombre: coerce_string(obj.get("nombre"), "nombre")?,
        descripcion: coerce_string(obj.get("descripcion"), "descripcion")?,
        precio: coerce_f64(obj.get("precio"), "precio")?,
        cantidad: coerce_i64(obj.get("cantidad"), "cantidad")?,
    })
}

fn coerce_string(value: Option<&Value>, field: &str) -> Result<String, serde_json::Error> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(serde_json::Error::custom(format!(
            "field '{}' is not a string: {}",
            field, other
        ))),
    }
}

fn coerce_u32(value: Option<&Value>, field: &str) -> Result<u32, serde_json::Error> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| serde_json::Error::custom(format!("field '{}' out of range", field))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde_json::Error::custom(format!("field '{}' not an integer", field))),
        Some(other) => Err(serde_json::Error::custom(format!(
            "field '{}' is not a number: {}",
            field, other
        ))),
    }
}

fn coerce_i64(value: Option<&Value>, field: &str) -> Result<i64, serde_json::Error> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| serde_json::Error::custom(format!("field '{}' out of range", field))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde_json::Error::custom(format!("field '{}' not an integer", field))),
        Some(other) => Err(serde_json::Error::custom(format!(
            "field '{}' is not a number: {}",
            field, other
        ))),
    }
}

fn coerce_f64(value: Option<&Value>, field: &str) -> Result<f64, serde_json::Error> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| serde_json::Error::custom(format!("field '{}' out of range", field))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde_json::Error::custom(format!("field '{}' not a number", field))),
        Some(other) => Err(serde_json::Error::custom(format!(
            "field '{}' is not a number: {}",
            field, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::errors::InventoryError;
    use tempfile::TempDir;

    fn sample() -> Vec<Product> {
        vec![Product {
            id: 3,
            nombre: "Cinta métrica".to_string(),
            descripcion: "5 metros".to_string(),
            precio: 6.75,
            cantidad: 12,
        }]
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.json");

        JsonFormat.save(&path, &sample()).unwrap();
        assert_eq!(JsonFormat.load(&path).unwrap(), sample());
    }

    #[test]
    fn test_pretty_printed_with_literal_non_ascii() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.json");

        JsonFormat.save(&path, &sample()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        // 2-space indentation and unescaped UTF-8
        assert!(contents.contains("\n  {"));
        assert!(contents.contains("Cinta métrica"));
        assert!(!contents.contains("\\u00e9"));
    }

    #[test]
    fn test_malformed_document_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.json");
        fs::write(&path, "{\"not\": \"an array\"").unwrap();

        assert!(matches!(
            JsonFormat.load(&path),
            Err(InventoryError::Json(_))
        ));
    }

    #[test]
    fn test_bad_record_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.json");
        fs::write(
            &path,
            r#"[{"id": 1, "nombre": "Bien", "precio": 1.0, "cantidad": 2},
               {"id": "x", "nombre": "Mal"}]"#,
        )
        .unwrap();

        assert!(JsonFormat.load(&path).is_err());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.json");
        fs::write(&path, r#"[{"nombre": "Suelto"}]"#).unwrap();

        let loaded = JsonFormat.load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 0);
        assert_eq!(loaded[0].precio, 0.0);
        assert_eq!(loaded[0].cantidad, 0);
    }
}
