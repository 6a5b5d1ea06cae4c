//! # Inventory Store
//!
//! The in-memory product collection plus its three-file persistence.
//!
//! ## Invariants
//! - Ids are unique within a store and never reused after deletion
//!   (next id is `max(existing) + 1`, or 1 when empty)
//! - Memory is the single source of truth; the three files are derived
//!   encodings rewritten in full on every mutation
//! - Seed priority at open is CSV > JSON > TXT; a missing file is
//!   never an error
//! - Not-found on update/delete reports `Ok(false)` and triggers no save

use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::{Logger, Severity};

use super::errors::InventoryResult;
use super::formats::{CsvFormat, Format, JsonFormat, TxtFormat};
use super::product::{NewProduct, Product, ProductPatch};

/// CSV file name inside the data directory
pub const CSV_FILE: &str = "datos.csv";
/// JSON file name inside the data directory
pub const JSON_FILE: &str = "datos.json";
/// Delimited text file name inside the data directory
pub const TXT_FILE: &str = "datos.txt";

/// The file-backed inventory store.
///
/// Single-threaded by design: all I/O is blocking and performed inline
/// with the mutating call. Callers that share a store across tasks wrap
/// it in a lock.
pub struct Inventory {
    data_dir: PathBuf,
    products: Vec<Product>,
}

impl Inventory {
    /// Open a store over the given data directory, creating the
    /// directory if needed and seeding memory from the first existing
    /// file in priority order CSV > JSON > TXT. Starts empty when no
    /// file exists.
    pub fn open(data_dir: impl Into<PathBuf>) -> InventoryResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;

        let mut store = Self {
            data_dir,
            products: Vec::new(),
        };

        let format_name = match store.seed_binding() {
            Some((name, path, format)) => {
                store.products = format.load(&path)?;
                name
            }
            None => "none",
        };

        Logger::log(
            Severity::Info,
            "store_loaded",
            &[
                ("format", format_name),
                ("productos", store.products.len().to_string().as_str()),
            ],
        );

        Ok(store)
    }

    /// The three persisted representations in priority order.
    fn bindings(&self) -> [(&'static str, PathBuf, &'static dyn Format); 3] {
        [
            ("csv", self.csv_path(), &CsvFormat),
            ("json", self.json_path(), &JsonFormat),
            ("txt", self.txt_path(), &TxtFormat),
        ]
    }

    /// The highest-priority representation whose file exists on disk.
    fn seed_binding(&self) -> Option<(&'static str, PathBuf, &'static dyn Format)> {
        self.bindings().into_iter().find(|(_, path, _)| path.exists())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(CSV_FILE)
    }

    pub fn json_path(&self) -> PathBuf {
        self.data_dir.join(JSON_FILE)
    }

    pub fn txt_path(&self) -> PathBuf {
        self.data_dir.join(TXT_FILE)
    }

    /// Snapshot copy of the collection in store-internal order
    /// (load order, then append order of later insertions).
    pub fn list(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Linear scan by id.
    pub fn find(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Rewrite all three files in full, in order CSV, JSON, TXT.
    ///
    /// Full-overwrite model: no append, no cross-file atomicity. A
    /// crash mid-save can leave the files mutually inconsistent, and
    /// I/O errors propagate to the caller untouched.
    pub fn save_all(&self) -> InventoryResult<()> {
        for (_, path, format) in self.bindings() {
            format.save(&path, &self.products)?;
        }
        Ok(())
    }

    /// Assign the next id, append and persist. Returns the created record.
    pub fn add(&mut self, new: NewProduct) -> InventoryResult<Product> {
        let product = self.append(new);
        self.save_all()?;
        Ok(product)
    }

    /// Append without persisting, for bulk seeding. The caller is
    /// responsible for an eventual `save_all`.
    pub fn add_unpersisted(&mut self, new: NewProduct) -> Product {
        self.append(new)
    }

    fn append(&mut self, new: NewProduct) -> Product {
        let product = Product {
            id: self.next_id(),
            nombre: new.nombre,
            descripcion: new.descripcion,
            precio: new.precio,
            cantidad: new.cantidad,
        };
        self.products.push(product.clone());
        product
    }

    /// Apply only the supplied fields to the product with the given id,
    /// then persist. `Ok(false)` when the id is unknown, with no side
    /// effect on memory or disk.
    pub fn update(&mut self, id: u32, patch: ProductPatch) -> InventoryResult<bool> {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };

        if let Some(nombre) = patch.nombre {
            product.nombre = nombre;
        }
        if let Some(descripcion) = patch.descripcion {
            product.descripcion = descripcion;
        }
        if let Some(precio) = patch.precio {
            product.precio = precio;
        }
        if let Some(cantidad) = patch.cantidad {
            product.cantidad = cantidad;
        }

        self.save_all()?;
        Ok(true)
    }

    /// Remove the product with the given id and persist. `Ok(false)`
    /// when the id is unknown, with no side effect. Remaining ids are
    /// never renumbered.
    pub fn delete(&mut self, id: u32) -> InventoryResult<bool> {
        let Some(index) = self.products.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        self.products.remove(index);
        self.save_all()?;
        Ok(true)
    }

    /// Saturating: a loaded file may carry `u32::MAX` as an id and the
    /// add path must not panic on it.
    fn next_id(&self) -> u32 {
        self.products
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(1, |id| id.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> Inventory {
        Inventory::open(dir.path().join("datos")).unwrap()
    }

    #[test]
    fn test_opens_empty_when_no_files_exist() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.is_empty());
        assert!(store.data_dir().is_dir());
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        let first = store
            .add(NewProduct {
                nombre: "Widget".to_string(),
                descripcion: "A widget".to_string(),
                precio: 9.99,
                cantidad: 10,
            })
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.precio, 9.99);

        let second = store.add(NewProduct::named("Gadget")).unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(second.descripcion, "");
        assert_eq!(second.precio, 0.0);
        assert_eq!(second.cantidad, 0);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        store.add(NewProduct::named("a")).unwrap();
        let b = store.add(NewProduct::named("b")).unwrap();
        store.add(NewProduct::named("c")).unwrap();

        assert!(store.delete(b.id).unwrap());
        let d = store.add(NewProduct::named("d")).unwrap();
        assert_eq!(d.id, 4);

        let ids: Vec<u32> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_update_applies_only_supplied_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        let p = store
            .add(NewProduct {
                nombre: "Llave".to_string(),
                descripcion: "Inglesa".to_string(),
                precio: 15.0,
                cantidad: 2,
            })
            .unwrap();

        let updated = store
            .update(
                p.id,
                ProductPatch {
                    precio: Some(12.5),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated);

        let after = store.find(p.id).unwrap();
        assert_eq!(after.precio, 12.5);
        assert_eq!(after.nombre, "Llave");
        assert_eq!(after.descripcion, "Inglesa");
        assert_eq!(after.cantidad, 2);
    }

    #[test]
    fn test_update_unknown_id_reports_false() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        assert!(!store.update(99, ProductPatch::default()).unwrap());
    }

    #[test]
    fn test_delete_unknown_id_reports_false() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        assert!(!store.delete(42).unwrap());
    }

    #[test]
    fn test_save_all_writes_three_files() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add(NewProduct::named("x")).unwrap();

        assert!(store.csv_path().exists());
        assert!(store.json_path().exists());
        assert!(store.txt_path().exists());
    }

    #[test]
    fn test_seed_binding_names_winning_format() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("datos");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join(JSON_FILE), "[]").unwrap();
        std::fs::write(data_dir.join(TXT_FILE), "").unwrap();

        let store = Inventory::open(&data_dir).unwrap();
        let (name, _, _) = store.seed_binding().unwrap();
        assert_eq!(name, "json");

        std::fs::write(data_dir.join(CSV_FILE), "id,nombre,descripcion,precio,cantidad\n")
            .unwrap();
        let (name, _, _) = store.seed_binding().unwrap();
        assert_eq!(name, "csv");
    }

    #[test]
    fn test_seed_binding_none_when_no_files() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.seed_binding().is_none());
    }

    #[test]
    fn test_next_id_saturates_at_u32_max() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.products.push(Product {
            id: u32::MAX,
            nombre: "Tope".to_string(),
            descripcion: String::new(),
            precio: 1.0,
            cantidad: 1,
        });

        let p = store.add_unpersisted(NewProduct::named("y"));
        assert_eq!(p.id, u32::MAX);
    }

    #[test]
    fn test_add_unpersisted_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add_unpersisted(NewProduct::named("x"));

        assert_eq!(store.len(), 1);
        assert!(!store.csv_path().exists());
    }
}
