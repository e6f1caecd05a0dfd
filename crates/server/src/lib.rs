//! Honeypot HTTP service
//!
//! Wires the detector and agent into a web surface: routing, API-key
//! auth, per-session serialization, the evaluation callback, and metrics.

pub mod auth;
pub mod http;
pub mod metrics;
pub mod reporter;
pub mod session;
pub mod state;

pub use auth::auth_middleware;
pub use http::create_router;
pub use metrics::init_metrics;
pub use reporter::{DisabledSink, HttpCallbackSink, ReportSink};
pub use session::{SessionEntry, SessionManager};
pub use state::AppState;

use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Session error: {0}")]
    Session(String),

    #[error("Session capacity exceeded: {0}")]
    Capacity(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Callback error: {0}")]
    Callback(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<&ServerError> for axum::http::StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::Session(_) => axum::http::StatusCode::NOT_FOUND,
            ServerError::Capacity(_) => axum::http::StatusCode::SERVICE_UNAVAILABLE,
            ServerError::InvalidRequest(_) => axum::http::StatusCode::BAD_REQUEST,
            ServerError::Callback(_) => axum::http::StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
