//! Product HTTP routes, all gated on a valid session cookie.
//!
//! Unauthenticated requests redirect to `/login`. Every mutation flows
//! through the inventory store, which rewrites the three data files
//! before the redirect is sent.

use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::inventory::{InventoryError, InventoryResult, NewProduct, ProductPatch};
use crate::observability::{Logger, Severity};

use super::auth_routes::server_error;
use super::state::AppState;
use super::templates;

/// Routes owned by the product surface
pub fn product_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/productos", get(productos_handler))
        .route("/crear", get(crear_form).post(crear_submit))
        .route("/editar/:id", get(editar_form).post(editar_submit))
        .route("/eliminar/:id", post(eliminar_handler))
        .with_state(state)
}

/// Product create/edit form fields. Numeric fields arrive as text and
/// are coerced here, before anything reaches the store.
#[derive(Debug, Deserialize)]
struct ProductForm {
    nombre: String,
    #[serde(default)]
    descripcion: String,
    #[serde(default)]
    precio: String,
    #[serde(default)]
    cantidad: String,
}

impl ProductForm {
    fn into_new_product(self) -> InventoryResult<NewProduct> {
        Ok(NewProduct {
            nombre: self.nombre,
            descripcion: self.descripcion,
            precio: coerce_field("precio", &self.precio)?,
            cantidad: coerce_field("cantidad", &self.cantidad)?,
        })
    }
}

/// Blank input keeps the permissive zero default; anything else must parse.
fn coerce_field<T: std::str::FromStr + Default>(
    field: &'static str,
    raw: &str,
) -> InventoryResult<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse()
        .map_err(|_| InventoryError::invalid_field(field, raw))
}

fn login_redirect() -> Response {
    Redirect::to("/login").into_response()
}

async fn productos_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(session) = state.session_from_headers(&headers) else {
        return login_redirect();
    };

    let store = match state.store.lock() {
        Ok(store) => store,
        Err(_) => return server_error("store lock poisoned"),
    };

    Html(templates::productos_page(&session.user_name, &store.list())).into_response()
}

async fn crear_form(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if state.session_from_headers(&headers).is_none() {
        return login_redirect();
    }
    Html(templates::crear_page()).into_response()
}

async fn crear_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<ProductForm>,
) -> Response {
    if state.session_from_headers(&headers).is_none() {
        return login_redirect();
    }

    let new = match form.into_new_product() {
        Ok(new) => new,
        Err(e) => {
            return Html(templates::result_page("Error", &e.to_string(), "/crear"))
                .into_response();
        }
    };

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(_) => return server_error("store lock poisoned"),
    };

    match store.add(new) {
        Ok(product) => {
            Logger::log(
                Severity::Info,
                "product_created",
                &[("id", product.id.to_string().as_str()), ("nombre", product.nombre.as_str())],
            );
            Redirect::to("/productos").into_response()
        }
        Err(e) => server_error(&e.to_string()),
    }
}

async fn editar_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<u32>,
) -> Response {
    if state.session_from_headers(&headers).is_none() {
        return login_redirect();
    }

    let store = match state.store.lock() {
        Ok(store) => store,
        Err(_) => return server_error("store lock poisoned"),
    };

    match store.find(id) {
        Some(product) => Html(templates::editar_page(product)).into_response(),
        None => Html(templates::result_page(
            "No encontrado",
            "Producto no encontrado.",
            "/productos",
        ))
        .into_response(),
    }
}

async fn editar_submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<u32>,
    Form(form): Form<ProductForm>,
) -> Response {
    if state.session_from_headers(&headers).is_none() {
        return login_redirect();
    }

    // The edit form posts the full field set
    let patch = match form.into_new_product() {
        Ok(new) => ProductPatch {
            nombre: Some(new.nombre),
            descripcion: Some(new.descripcion),
            precio: Some(new.precio),
            cantidad: Some(new.cantidad),
        },
        Err(e) => {
            return Html(templates::result_page(
                "Error",
                &e.to_string(),
                &format!("/editar/{}", id),
            ))
            .into_response();
        }
    };

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(_) => return server_error("store lock poisoned"),
    };

    match store.update(id, patch) {
        Ok(true) => {
            Logger::log(Severity::Info, "product_updated", &[("id", id.to_string().as_str())]);
            Redirect::to("/productos").into_response()
        }
        Ok(false) => Html(templates::result_page(
            "No encontrado",
            "Producto no encontrado.",
            "/productos",
        ))
        .into_response(),
        Err(e) => server_error(&e.to_string()),
    }
}

async fn eliminar_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<u32>,
) -> Response {
    if state.session_from_headers(&headers).is_none() {
        return login_redirect();
    }

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(_) => return server_error("store lock poisoned"),
    };

    // The listing always redirects back, found or not
    match store.delete(id) {
        Ok(deleted) => {
            if deleted {
                Logger::log(Severity::Info, "product_deleted", &[("id", id.to_string().as_str())]);
            }
            Redirect::to("/productos").into_response()
        }
        Err(e) => server_error(&e.to_string()),
    }
}
