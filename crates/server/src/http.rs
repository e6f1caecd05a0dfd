//! HTTP endpoints
//!
//! REST surface for the honeypot: the chat exchange, session snapshots,
//! and the health/metrics plumbing.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use honeypot_core::ExtractedIntelligence;

use crate::auth::auth_middleware;
use crate::metrics::{
    metrics_handler, record_callback_delivery, record_chat_request, record_scam_detected,
    record_session_created,
};
use crate::state::AppState;
use crate::ServerError;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/chat", post(chat))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:id", get(get_session))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Inbound chat request. The message may arrive nested or, from sloppier
/// clients, as a flat `text` field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    session_id: Option<String>,
    message: Option<InboundMessage>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InboundMessage {
    text: Option<String>,
    #[allow(dead_code)]
    sender: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    status: &'static str,
    reply: String,
    session_id: String,
    scam_detected: bool,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn error_response(err: &ServerError) -> ApiError {
    (
        StatusCode::from(err),
        Json(serde_json::json!({ "error": err.to_string() })),
    )
}

/// One conversation exchange
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    record_chat_request();

    let session_id = request
        .session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let text = request
        .message
        .and_then(|m| m.text)
        .or(request.text)
        .filter(|t| !t.is_empty());

    let Some(text) = text else {
        return Err(error_response(&ServerError::InvalidRequest(
            "no message text provided".to_string(),
        )));
    };

    let existed = state.sessions.get(&session_id).is_some();
    let entry = state
        .sessions
        .get_or_create(&session_id)
        .map_err(|e| error_response(&e))?;
    if !existed {
        record_session_created();
    }
    entry.touch();

    // Hold the per-session lock for the whole sequential pipeline, then
    // release it before any network delivery.
    let (reply, scam_detected, report) = {
        let mut engagement = entry.engagement().await;
        let outcome = engagement.process_message(&state.detector, &state.agent, &text);

        if outcome.assessment.is_scam {
            record_scam_detected();
        }

        let min_turns = state.settings.engagement.report_min_turns;
        let report = engagement
            .report_due(min_turns, outcome.reply.end_conversation)
            .then(|| engagement.final_report());

        (outcome.reply, engagement.session().scam_detected(), report)
    };

    if let Some(report) = report {
        match state.reporter.deliver(&report).await {
            Ok(()) => record_callback_delivery(true),
            Err(e) => {
                tracing::warn!(session_id = %session_id, "callback delivery failed: {e}");
                record_callback_delivery(false);
            }
        }
    }

    Ok(Json(ChatResponse {
        status: "success",
        reply: reply.text,
        session_id,
        scam_detected,
    }))
}

/// Session snapshot: state plus accumulated intelligence
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entry = state
        .sessions
        .get(&id)
        .ok_or_else(|| error_response(&ServerError::Session(format!("unknown session: {id}"))))?;
    let engagement = entry.engagement().await;
    let session = engagement.session();

    Ok(Json(serde_json::json!({
        "sessionId": session.id(),
        "turnCount": session.turn_count(),
        "scamDetected": session.scam_detected(),
        "messageCount": session.message_count(),
        "extractedIntelligence": ExtractedIntelligence::from_ledger(engagement.ledger()),
    })))
}

/// List sessions
async fn list_sessions(State(state): State<AppState>) -> Json<serde_json::Value> {
    let sessions = state.sessions.list();
    Json(serde_json::json!({
        "sessions": sessions,
        "count": sessions.len(),
    }))
}

async fn home() -> &'static str {
    "Honeypot active. Send POST requests to /chat"
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "sessions": state.sessions.count(),
    }))
}
