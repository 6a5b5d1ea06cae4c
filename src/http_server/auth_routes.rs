//! Auth HTTP routes: register, login, logout and the user listing.
//!
//! Plain form submission and redirects. Failures render a result page
//! with a back-link rather than a JSON error body.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::auth::{AuthError, User};
use crate::observability::{Logger, Severity};

use super::state::{cookie_token, AppState, SESSION_COOKIE};
use super::templates;

/// Routes owned by the auth surface
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/register", get(register_form).post(register_submit))
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", get(logout_handler))
        .route("/usuarios", get(usuarios_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct RegisterForm {
    nombre: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

/// 500 page for unexpected storage/crypto failures
pub(super) fn server_error(message: &str) -> Response {
    Logger::log_stderr(Severity::Error, "request_failed", &[("error", message)]);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(templates::result_page("Error", message, "/")),
    )
        .into_response()
}

fn session_cookie(token: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, token)).ok()
}

fn expired_session_cookie() -> HeaderValue {
    HeaderValue::from_static("sesion=; Path=/; Max-Age=0; HttpOnly")
}

/// `/` - entry point: straight to the products when logged in
async fn index_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Redirect {
    if state.session_from_headers(&headers).is_some() {
        Redirect::to("/productos")
    } else {
        Redirect::to("/login")
    }
}

async fn register_form() -> Html<String> {
    Html(templates::register_page())
}

async fn register_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let user = match User::new(form.nombre, form.email, &form.password, &state.policy) {
        Ok(user) => user,
        Err(AuthError::WeakPassword(reason)) => {
            return Html(templates::result_page("Error", &reason, "/register")).into_response();
        }
        Err(e) => return server_error(&e.to_string()),
    };

    match state.users.create(&user) {
        Ok(()) => {
            Logger::log(
                Severity::Info,
                "user_registered",
                &[("email", user.email.as_str())],
            );
            Html(templates::result_page(
                "Registro exitoso",
                "Usuario registrado correctamente.",
                "/login",
            ))
            .into_response()
        }
        Err(AuthError::EmailAlreadyExists) => Html(templates::result_page(
            "Error",
            "El email ya está en uso.",
            "/register",
        ))
        .into_response(),
        Err(e) => server_error(&e.to_string()),
    }
}

async fn login_form() -> Html<String> {
    Html(templates::login_page())
}

async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let user = match state.users.find_by_email(&form.email) {
        Ok(user) => user,
        Err(e) => return server_error(&e.to_string()),
    };

    // A missing user and a wrong password produce the same page
    let user = match user {
        Some(user) if user.verify_password(&form.password).unwrap_or(false) => user,
        _ => {
            Logger::log(
                Severity::Warn,
                "user_login_failed",
                &[("email", form.email.as_str())],
            );
            return Html(templates::result_page(
                "Error de login",
                "Credenciales inválidas.",
                "/login",
            ))
            .into_response();
        }
    };

    let token = match state.sessions.create(user.id, user.nombre.clone()) {
        Ok(token) => token,
        Err(e) => return server_error(&e.to_string()),
    };

    let Some(cookie) = session_cookie(&token) else {
        return server_error("session cookie construction failed");
    };

    Logger::log(Severity::Info, "user_logged_in", &[("email", user.email.as_str())]);

    let mut response = Redirect::to("/productos").into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    response
}

async fn logout_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_token(&headers) {
        let _ = state.sessions.revoke(token);
    }

    let mut response = Redirect::to("/login").into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, expired_session_cookie());
    response
}

/// Session-gated list of registered users (id, nombre, email)
async fn usuarios_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if state.session_from_headers(&headers).is_none() {
        return Redirect::to("/login").into_response();
    }

    match state.users.list() {
        Ok(users) => Html(templates::usuarios_page(&users)).into_response(),
        Err(e) => server_error(&e.to_string()),
    }
}
