// ABOUTME: HTTP middleware layer: bearer token, login/password cookie gate, Google OAuth
// ABOUTME: Shared helpers for cookie parsing, bearer extraction, and constant-time comparison
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

//! HTTP middlewares
//!
//! Each middleware guards a path prefix and passes every other request
//! through untouched. They are wired in [`crate::routes`] according to the
//! server configuration.

pub mod bearer;
pub mod login;
pub mod oauth;

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

/// Extract a cookie value from the request headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Extract the token from a `Bearer` authorization header
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

/// Compare two secrets without leaking their contents through timing.
///
/// Length is compared first; `ct_eq` requires equal-length slices.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_get_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=authenticated; other=1"),
        );
        assert_eq!(
            get_cookie_value(&headers, "auth_token").as_deref(),
            Some("authenticated")
        );
        assert_eq!(get_cookie_value(&headers, "theme").as_deref(), Some("dark"));
        assert_eq!(get_cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_get_cookie_value_empty_headers() {
        let headers = HeaderMap::new();
        assert_eq!(get_cookie_value(&headers, "auth_token"), None);
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc123"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        // scheme is case-sensitive, matching the upstream check
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc123"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"secret-longer"));
        assert!(constant_time_eq(b"", b""));
    }
}
