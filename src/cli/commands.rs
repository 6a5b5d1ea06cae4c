//! CLI command implementations.
//!
//! `serve` boots the web server; `console` runs the interactive menu
//! over a store opened directly on the data directory. Menu mistakes
//! print a message and return to the menu; only configuration, boot and
//! stdin failures abort the process.

use std::path::Path;
use std::str::FromStr;

use crate::http_server::{HttpConfig, HttpServer};
use crate::inventory::{Inventory, InventoryError, NewProduct, ProductPatch};
use crate::observability::{Logger, Severity};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{print_table, prompt, prompt_with_default};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config } => serve(&config),
        Command::Console { data_dir } => console(&data_dir),
    }
}

/// Load configuration and serve HTTP until the process exits.
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = HttpConfig::load(config_path)
        .map_err(|e| CliError::config_error(format!("Failed to load config: {}", e)))?;

    let server = HttpServer::new(config)
        .map_err(|e| CliError::boot_failed(format!("Failed to open data directory: {}", e)))?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::boot_failed(e.to_string()))
}

/// Run the interactive console menu over the given data directory.
pub fn console(data_dir: &Path) -> CliResult<()> {
    let mut store = Inventory::open(data_dir)?;

    loop {
        println!();
        println!("--- INVENTARIO ---");
        println!("1) Listar productos");
        println!("2) Agregar producto");
        println!("3) Editar producto");
        println!("4) Eliminar producto");
        println!("5) Guardar archivos (CSV/JSON/TXT)");
        println!("0) Salir");

        let choice = prompt("Elige una opción: ")?;
        match choice.as_str() {
            "1" => print_table(&store.list()),
            "2" => add_interactive(&mut store)?,
            "3" => edit_interactive(&mut store)?,
            "4" => delete_interactive(&mut store)?,
            "5" => match store.save_all() {
                Ok(()) => println!("Guardado en CSV/JSON/TXT."),
                Err(e) => {
                    Logger::log_stderr(Severity::Error, "save_failed", &[("error", e.to_string().as_str())]);
                    println!("Error al guardar: {}", e);
                }
            },
            "0" => break,
            _ => println!("Opción no válida."),
        }
    }

    Ok(())
}

/// Blank input takes the zero default; anything else must parse.
fn coerce_numeric<T: FromStr + Default>(field: &'static str, raw: &str) -> Result<T, InventoryError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse()
        .map_err(|_| InventoryError::invalid_field(field, raw))
}

fn add_interactive(store: &mut Inventory) -> CliResult<()> {
    let nombre = prompt("Nombre: ")?;
    let descripcion = prompt("Descripción: ")?;
    let precio = prompt("Precio: ")?;
    let cantidad = prompt("Cantidad: ")?;

    let new = match build_new_product(nombre, descripcion, &precio, &cantidad) {
        Ok(new) => new,
        Err(e) => {
            println!("Error al agregar: {}", e);
            return Ok(());
        }
    };

    match store.add(new) {
        Ok(product) => println!("Agregado id={}", product.id),
        Err(e) => println!("Error al agregar: {}", e),
    }
    Ok(())
}

fn build_new_product(
    nombre: String,
    descripcion: String,
    precio: &str,
    cantidad: &str,
) -> Result<NewProduct, InventoryError> {
    Ok(NewProduct {
        nombre,
        descripcion,
        precio: coerce_numeric("precio", precio)?,
        cantidad: coerce_numeric("cantidad", cantidad)?,
    })
}

fn edit_interactive(store: &mut Inventory) -> CliResult<()> {
    let raw_id = prompt("ID del producto a editar: ")?;
    let Ok(id) = raw_id.parse::<u32>() else {
        println!("ID no válido.");
        return Ok(());
    };

    let Some(current) = store.find(id).cloned() else {
        println!("No encontrado.");
        return Ok(());
    };

    println!("Dejar vacío para mantener el valor actual.");
    let nombre = prompt_with_default("Nombre", &current.nombre)?;
    let descripcion = prompt_with_default("Descripción", &current.descripcion)?;
    let precio = prompt_with_default("Precio", &current.precio.to_string())?;
    let cantidad = prompt_with_default("Cantidad", &current.cantidad.to_string())?;

    let patch = match build_patch(nombre, descripcion, &precio, &cantidad) {
        Ok(patch) => patch,
        Err(e) => {
            println!("Error al actualizar: {}", e);
            return Ok(());
        }
    };

    match store.update(id, patch) {
        Ok(true) => println!("Actualizado."),
        Ok(false) => println!("No encontrado."),
        Err(e) => println!("Error al actualizar: {}", e),
    }
    Ok(())
}

fn build_patch(
    nombre: String,
    descripcion: String,
    precio: &str,
    cantidad: &str,
) -> Result<ProductPatch, InventoryError> {
    Ok(ProductPatch {
        nombre: Some(nombre),
        descripcion: Some(descripcion),
        precio: Some(coerce_numeric("precio", precio)?),
        cantidad: Some(coerce_numeric("cantidad", cantidad)?),
    })
}

fn delete_interactive(store: &mut Inventory) -> CliResult<()> {
    let raw_id = prompt("ID del producto a eliminar: ")?;
    let Ok(id) = raw_id.parse::<u32>() else {
        println!("ID no válido.");
        return Ok(());
    };

    match store.delete(id) {
        Ok(true) => println!("Eliminado."),
        Ok(false) => println!("No encontrado."),
        Err(e) => println!("Error al eliminar: {}", e),
    }
    Ok(())
}
