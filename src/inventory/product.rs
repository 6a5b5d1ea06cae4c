//! # Product Model
//!
//! The single inventory record entity. Field names are the on-disk
//! column/key names for all three persisted formats, so renaming a
//! field here changes the file contracts.

use serde::{Deserialize, Serialize};

/// An inventory record.
///
/// `id` is assigned by the store (`max(existing) + 1`, never reused
/// after deletion) and is unique within one store instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier
    pub id: u32,

    /// Product name
    pub nombre: String,

    /// Free-form description
    #[serde(default)]
    pub descripcion: String,

    /// Unit price (non-negative intended, not enforced)
    #[serde(default)]
    pub precio: f64,

    /// Stock quantity (not enforced non-negative)
    #[serde(default)]
    pub cantidad: i64,
}

/// Request to create a product. The store assigns the id.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    pub cantidad: i64,
}

impl NewProduct {
    /// A product with just a name and defaults for everything else.
    pub fn named(nombre: impl Into<String>) -> Self {
        Self {
            nombre: nombre.into(),
            ..Default::default()
        }
    }
}

/// Partial update for an existing product.
///
/// Absent fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<f64>,
    pub cantidad: Option<i64>,
}

impl ProductPatch {
    /// True when no field is supplied (the update is a no-op).
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.descripcion.is_none()
            && self.precio.is_none()
            && self.cantidad.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_uses_defaults() {
        let p = NewProduct::named("Gadget");
        assert_eq!(p.nombre, "Gadget");
        assert_eq!(p.descripcion, "");
        assert_eq!(p.precio, 0.0);
        assert_eq!(p.cantidad, 0);
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProductPatch::default().is_empty());
        let patch = ProductPatch {
            precio: Some(1.5),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_product_json_field_names() {
        let p = Product {
            id: 1,
            nombre: "Tornillo".to_string(),
            descripcion: "M4".to_string(),
            precio: 0.1,
            cantidad: 500,
        };
        let json = serde_json::to_value(&p).unwrap();
        for key in ["id", "nombre", "descripcion", "precio", "cantidad"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }
}
