//! Server-rendered HTML pages.
//!
//! Plain string templates for the form-and-redirect flow: no template
//! engine, every dynamic value passes through [`escape`].

use crate::auth::User;
use crate::inventory::Product;

/// Escape a value for safe interpolation into HTML text or attributes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(titulo: &str, cuerpo: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"es\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{titulo}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{titulo}</h1>\n\
         {cuerpo}\n\
         </body>\n\
         </html>",
        titulo = escape(titulo),
        cuerpo = cuerpo
    )
}

/// Generic result page: a title, a message and a back-link.
pub fn result_page(titulo: &str, mensaje: &str, volver_url: &str) -> String {
    layout(
        titulo,
        &format!(
            "<p>{}</p>\n<p><a href=\"{}\">Volver</a></p>",
            escape(mensaje),
            escape(volver_url)
        ),
    )
}

pub fn login_page() -> String {
    layout(
        "Iniciar sesión",
        "<form method=\"post\" action=\"/login\">\n\
         <label>Email: <input type=\"email\" name=\"email\" required></label><br>\n\
         <label>Contraseña: <input type=\"password\" name=\"password\" required></label><br>\n\
         <button type=\"submit\">Entrar</button>\n\
         </form>\n\
         <p><a href=\"/register\">Crear una cuenta</a></p>",
    )
}

pub fn register_page() -> String {
    layout(
        "Registro",
        "<form method=\"post\" action=\"/register\">\n\
         <label>Nombre: <input type=\"text\" name=\"nombre\" required></label><br>\n\
         <label>Email: <input type=\"email\" name=\"email\" required></label><br>\n\
         <label>Contraseña: <input type=\"password\" name=\"password\" required></label><br>\n\
         <button type=\"submit\">Registrarse</button>\n\
         </form>\n\
         <p><a href=\"/login\">Ya tengo cuenta</a></p>",
    )
}

pub fn productos_page(user_name: &str, products: &[Product]) -> String {
    let mut rows = String::new();
    for p in products {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td>\
             <td><a href=\"/editar/{}\">Editar</a>\n\
             <form method=\"post\" action=\"/eliminar/{}\" style=\"display:inline\">\
             <button type=\"submit\">Eliminar</button></form></td></tr>\n",
            p.id,
            escape(&p.nombre),
            escape(&p.descripcion),
            p.precio,
            p.cantidad,
            p.id,
            p.id
        ));
    }

    let tabla = if products.is_empty() {
        "<p>No hay productos.</p>".to_string()
    } else {
        format!(
            "<table border=\"1\">\n\
             <tr><th>ID</th><th>Nombre</th><th>Descripción</th><th>Precio</th><th>Cantidad</th><th></th></tr>\n\
             {rows}</table>"
        )
    };

    layout(
        "Productos",
        &format!(
            "<p>Sesión de {}. <a href=\"/logout\">Salir</a></p>\n\
             {}\n\
             <p><a href=\"/crear\">Nuevo producto</a> | <a href=\"/usuarios\">Usuarios</a></p>",
            escape(user_name),
            tabla
        ),
    )
}

fn product_form(action: &str, product: Option<&Product>) -> String {
    let (nombre, descripcion, precio, cantidad) = match product {
        Some(p) => (
            escape(&p.nombre),
            escape(&p.descripcion),
            p.precio.to_string(),
            p.cantidad.to_string(),
        ),
        None => (String::new(), String::new(), String::new(), String::new()),
    };

    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Nombre: <input type=\"text\" name=\"nombre\" value=\"{nombre}\" required></label><br>\n\
         <label>Descripción: <input type=\"text\" name=\"descripcion\" value=\"{descripcion}\"></label><br>\n\
         <label>Precio: <input type=\"text\" name=\"precio\" value=\"{precio}\"></label><br>\n\
         <label>Cantidad: <input type=\"text\" name=\"cantidad\" value=\"{cantidad}\"></label><br>\n\
         <button type=\"submit\">Guardar</button>\n\
         </form>\n\
         <p><a href=\"/productos\">Volver</a></p>",
        action = escape(action)
    )
}

pub fn crear_page() -> String {
    layout("Nuevo producto", &product_form("/crear", None))
}

pub fn editar_page(product: &Product) -> String {
    layout(
        "Editar producto",
        &product_form(&format!("/editar/{}", product.id), Some(product)),
    )
}

pub fn usuarios_page(users: &[User]) -> String {
    let mut rows = String::new();
    for u in users {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            u.id,
            escape(&u.nombre),
            escape(&u.email)
        ));
    }

    layout(
        "Usuarios",
        &format!(
            "<table border=\"1\">\n\
             <tr><th>ID</th><th>Nombre</th><th>Email</th></tr>\n\
             {rows}</table>\n\
             <p><a href=\"/productos\">Volver</a></p>"
        ),
    )
}
