//! API-key authentication middleware
//!
//! Checks the `x-api-key` header against the configured key. Public paths
//! (health, readiness, metrics) bypass the check. Comparison is
//! constant-time.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Track whether we've warned about auth being disabled (warn once only)
static AUTH_DISABLED_WARNED: AtomicBool = AtomicBool::new(false);

enum AuthCheck {
    /// Authentication disabled, pass through
    Disabled,
    /// Path is public, pass through
    PublicPath,
    /// Auth enabled but no key configured
    ConfigError,
    /// Compare against this expected key
    CheckKey(String),
}

fn check_auth_config(state: &AppState, path: &str) -> AuthCheck {
    let auth = &state.settings.server.auth;

    if !auth.enabled {
        if !AUTH_DISABLED_WARNED.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                "API authentication is DISABLED. Set HONEYPOT__SERVER__AUTH__ENABLED=true for production."
            );
        }
        return AuthCheck::Disabled;
    }

    if auth.public_paths.iter().any(|p| path.starts_with(p)) {
        return AuthCheck::PublicPath;
    }

    match auth.api_key.as_deref() {
        Some(key) if !key.is_empty() => AuthCheck::CheckKey(key.to_string()),
        _ => AuthCheck::ConfigError,
    }
}

/// Reject requests without a valid `x-api-key` header
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match check_auth_config(&state, &path) {
        AuthCheck::Disabled | AuthCheck::PublicPath => next.run(request).await,
        AuthCheck::ConfigError => {
            tracing::error!("auth is enabled but no API key is configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Server authentication not configured" })),
            )
                .into_response()
        }
        AuthCheck::CheckKey(expected_key) => {
            let provided = request
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok());

            match provided {
                Some(key) if constant_time_compare(key.as_bytes(), expected_key.as_bytes()) => {
                    next.run(request).await
                }
                Some(_) => {
                    tracing::warn!(path = %path, "invalid API key");
                    unauthorized()
                }
                None => unauthorized(),
            }
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

/// Constant-time comparison to prevent timing attacks
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare(b"secret", b"secret"));
        assert!(!constant_time_compare(b"secret", b"secre"));
        assert!(!constant_time_compare(b"secret", b"secreT"));
        assert!(!constant_time_compare(b"abc", b"xyz"));
    }

    #[test]
    fn test_public_path_bypasses_check() {
        let mut state = crate::state::AppState::for_tests();
        {
            let settings = std::sync::Arc::get_mut(&mut state.settings).unwrap();
            settings.server.auth.enabled = true;
            settings.server.auth.api_key = Some("secret".to_string());
        }

        assert!(matches!(
            check_auth_config(&state, "/health"),
            AuthCheck::PublicPath
        ));
        assert!(matches!(
            check_auth_config(&state, "/chat"),
            AuthCheck::CheckKey(_)
        ));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let mut state = crate::state::AppState::for_tests();
        {
            let settings = std::sync::Arc::get_mut(&mut state.settings).unwrap();
            settings.server.auth.enabled = true;
            settings.server.auth.api_key = None;
        }

        assert!(matches!(
            check_auth_config(&state, "/chat"),
            AuthCheck::ConfigError
        ));
    }
}
