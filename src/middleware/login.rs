// ABOUTME: Login/password cookie middleware protecting the static documents mount
// ABOUTME: GET shows a login form, POST validates credentials and sets the session cookie
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::{constant_time_eq, get_cookie_value};
use crate::config::DocumentsConfig;
use crate::constants::{auth, limits, routes};
use crate::mcp::resources::ServerResources;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Gate `/documents` behind a session cookie.
///
/// A request carrying `auth_token=authenticated` passes through. POST with
/// valid form credentials sets the cookie and redirects back to the
/// requested URL; everything else gets the login form.
pub async fn login_gate_middleware(
    State(resources): State<Arc<ServerResources>>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with(routes::DOCUMENTS_PATH) {
        return next.run(request).await;
    }

    let authenticated = get_cookie_value(request.headers(), auth::AUTH_COOKIE_NAME)
        .is_some_and(|value| value == auth::AUTH_COOKIE_VALUE);
    if authenticated {
        return next.run(request).await;
    }

    if request.method() == Method::POST {
        handle_login(&resources.config.documents, request).await
    } else {
        login_form(None)
    }
}

async fn handle_login(documents: &DocumentsConfig, request: Request) -> Response {
    let original_uri = request.uri().clone();
    let body = request.into_body();

    let bytes = match axum::body::to_bytes(body, limits::MAX_FORM_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "failed to read login form body");
            return login_form(Some(INVALID_CREDENTIALS));
        }
    };
    let Ok(form) = serde_urlencoded::from_bytes::<LoginForm>(&bytes) else {
        return login_form(Some(INVALID_CREDENTIALS));
    };

    if credentials_match(documents, &form) {
        info!(path = %original_uri.path(), "document access granted");
        let cookie = format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
            auth::AUTH_COOKIE_NAME,
            auth::AUTH_COOKIE_VALUE,
            auth::AUTH_COOKIE_MAX_AGE_SECS,
        );
        Response::builder()
            .status(StatusCode::FOUND)
            .header(LOCATION, original_uri.to_string())
            .header(SET_COOKIE, cookie)
            .body(Body::empty())
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    } else {
        warn!("document login attempt with invalid credentials");
        login_form(Some(INVALID_CREDENTIALS))
    }
}

/// Form login only works when both credentials are configured
fn credentials_match(documents: &DocumentsConfig, form: &LoginForm) -> bool {
    match (&documents.username, &documents.password) {
        (Some(username), Some(password)) => {
            let user_ok = constant_time_eq(username.as_bytes(), form.username.as_bytes());
            let pass_ok = constant_time_eq(password.as_bytes(), form.password.as_bytes());
            user_ok && pass_ok
        }
        _ => false,
    }
}

fn login_form(error: Option<&str>) -> Response {
    let error_block = error.map_or_else(String::new, |message| {
        format!(r#"<p class="error">{message}</p>"#)
    });
    let page = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Document Access - Recruitee MCP Server</title>
    <style>
        body {{ font-family: sans-serif; display: flex; justify-content: center; margin-top: 10%; }}
        form {{ border: 1px solid #ccc; border-radius: 8px; padding: 2em; width: 20em; }}
        label {{ display: block; margin-top: 1em; }}
        input {{ width: 100%; padding: 0.5em; margin-top: 0.25em; box-sizing: border-box; }}
        button {{ margin-top: 1.5em; width: 100%; padding: 0.6em; }}
        .error {{ color: #b00020; }}
    </style>
</head>
<body>
    <form method="post">
        <h2>Document Access</h2>
        {error_block}
        <label>Username
            <input type="text" name="username" required>
        </label>
        <label>Password
            <input type="password" name="password" required>
        </label>
        <button type="submit">Log in</button>
    </form>
</body>
</html>"#
    );
    Html(page).into_response()
}
