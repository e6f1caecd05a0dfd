//! Prometheus metrics

use axum::extract::State;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::state::AppState;
use crate::ServerError;

/// Install the global Prometheus recorder; call once at startup
pub fn init_metrics() -> Result<PrometheusHandle, ServerError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Internal(format!("metrics recorder: {e}")))
}

/// Render the scrape payload
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.render()
}

pub fn record_chat_request() {
    metrics::counter!("honeypot_chat_requests_total").increment(1);
}

pub fn record_scam_detected() {
    metrics::counter!("honeypot_scam_messages_total").increment(1);
}

pub fn record_callback_delivery(success: bool) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!("honeypot_callbacks_total", "outcome" => outcome).increment(1);
}

pub fn record_session_created() {
    metrics::counter!("honeypot_sessions_created_total").increment(1);
}
