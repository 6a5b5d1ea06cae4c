//! Format round-trip tests
//!
//! Saving a non-empty product set and reloading each format
//! independently yields an equal set, and each format honors its own
//! load policy (CSV/TXT lenient, JSON strict).

use inventario::inventory::{
    CsvFormat, Format, Inventory, InventoryError, JsonFormat, NewProduct, Product, TxtFormat,
};
use tempfile::TempDir;

fn sample_set() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            nombre: "Tornillo".to_string(),
            descripcion: "M4 x 20, caja de 100".to_string(),
            precio: 4.75,
            cantidad: 42,
        },
        Product {
            id: 3,
            nombre: "Sierra eléctrica".to_string(),
            descripcion: String::new(),
            precio: 119.0,
            cantidad: 2,
        },
        Product {
            id: 4,
            nombre: "Cinta".to_string(),
            descripcion: "aisladora, negra".to_string(),
            precio: 0.99,
            cantidad: 0,
        },
    ]
}

// =============================================================================
// Independent per-format round-trips
// =============================================================================

#[test]
fn test_csv_roundtrip_preserves_every_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("datos.csv");

    CsvFormat.save(&path, &sample_set()).unwrap();
    assert_eq!(CsvFormat.load(&path).unwrap(), sample_set());
}

#[test]
fn test_json_roundtrip_preserves_every_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("datos.json");

    JsonFormat.save(&path, &sample_set()).unwrap();
    assert_eq!(JsonFormat.load(&path).unwrap(), sample_set());
}

#[test]
fn test_txt_roundtrip_preserves_every_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("datos.txt");

    TxtFormat.save(&path, &sample_set()).unwrap();
    assert_eq!(TxtFormat.load(&path).unwrap(), sample_set());
}

// =============================================================================
// A store save is loadable from any single surviving file
// =============================================================================

#[test]
fn test_each_saved_file_reseeds_an_equal_store() {
    let dir = TempDir::new().unwrap();
    let mut store = Inventory::open(dir.path()).unwrap();
    for p in sample_set() {
        store.add_unpersisted(NewProduct {
            nombre: p.nombre,
            descripcion: p.descripcion,
            precio: p.precio,
            cantidad: p.cantidad,
        });
    }
    store.save_all().unwrap();
    let expected = store.list();

    for keep in ["datos.csv", "datos.json", "datos.txt"] {
        let isolated = TempDir::new().unwrap();
        std::fs::copy(dir.path().join(keep), isolated.path().join(keep)).unwrap();

        let reseeded = Inventory::open(isolated.path()).unwrap();
        assert_eq!(reseeded.list(), expected, "reseeding from {}", keep);
    }
}

// =============================================================================
// Load policies
// =============================================================================

#[test]
fn test_csv_load_skips_bad_rows_and_keeps_good_ones() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("datos.csv");
    std::fs::write(
        &path,
        "id,nombre,descripcion,precio,cantidad\n\
         1,Uno,,1.0,1\n\
         dos,Dos,,2.0,2\n\
         3,Tres,,3.0,3\n",
    )
    .unwrap();

    let loaded = CsvFormat.load(&path).unwrap();
    let ids: Vec<u32> = loaded.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_txt_load_skips_short_and_bad_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("datos.txt");
    std::fs::write(
        &path,
        "3|Bolt|Small|0.5|100\n\
         1|solo|tres\n\
         \n\
         4|Nut|Hex|uno|2\n\
         5|Washer||0.05|250\n",
    )
    .unwrap();

    let loaded = TxtFormat.load(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(
        loaded[0],
        Product {
            id: 3,
            nombre: "Bolt".to_string(),
            descripcion: "Small".to_string(),
            precio: 0.5,
            cantidad: 100,
        }
    );
    assert_eq!(loaded[1].id, 5);
}

#[test]
fn test_json_load_is_all_or_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("datos.json");
    std::fs::write(
        &path,
        r#"[{"id": 1, "nombre": "Uno"}, {"id": [], "nombre": "Roto"}]"#,
    )
    .unwrap();

    assert!(matches!(
        JsonFormat.load(&path),
        Err(InventoryError::Json(_))
    ));
}

#[test]
fn test_store_open_fails_on_corrupt_json_seed() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("datos.json"), "not json at all").unwrap();

    assert!(Inventory::open(dir.path()).is_err());
}

#[test]
fn test_unescaped_separator_corrupts_txt_row_on_reload() {
    // Accepted limitation: a '|' inside a value shifts the fields
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("datos.txt");

    let tricky = vec![Product {
        id: 1,
        nombre: "Caño|flexible".to_string(),
        descripcion: "raro".to_string(),
        precio: 2.0,
        cantidad: 5,
    }];
    TxtFormat.save(&path, &tricky).unwrap();

    let reloaded = TxtFormat.load(&path).unwrap();
    assert_ne!(reloaded, tricky);
}
