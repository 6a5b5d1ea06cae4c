//! Line-based console I/O for the interactive inventory tool.
//!
//! All input is read as trimmed text with permissive defaults; the
//! product table prints fixed-width columns.

use std::io::{self, BufRead, Write};

use crate::inventory::Product;

use super::errors::CliResult;

/// Print a prompt and read one trimmed line from stdin.
pub fn prompt(label: &str) -> CliResult<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompt showing the current value; empty input keeps it.
pub fn prompt_with_default(label: &str, current: &str) -> CliResult<String> {
    let input = prompt(&format!("{} [{}]: ", label, current))?;
    if input.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(input)
    }
}

/// Print the product table, or a placeholder when empty.
pub fn print_table(products: &[Product]) {
    print_table_to(products, &mut io::stdout());
}

fn print_table_to<W: Write>(products: &[Product], out: &mut W) {
    if products.is_empty() {
        let _ = writeln!(out, "No hay productos.");
        return;
    }

    let header = format!("{:>3}  {:<20}  {:>8}  {:>5}", "ID", "NOMBRE", "PRECIO", "CANT");
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", "-".repeat(header.len()));

    for p in products {
        let _ = writeln!(
            out,
            "{:>3}  {:<20.20}  {:>8.2}  {:>5}",
            p.id, p.nombre, p.precio, p.cantidad
        );
    }
}
