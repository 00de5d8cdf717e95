//! HTTP routes for the Desk action service.
//!
//! Exposes the action-group invocation endpoint plus health probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use desk_jira::JiraClient;

use crate::event::InvocationEvent;
use crate::handler::handle_invocation;

// ============================================================================
// State
// ============================================================================

/// Shared state for the action HTTP server.
pub struct ActionState {
    /// Jira client, shared across invocations.
    pub jira: Arc<JiraClient>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

// ============================================================================
// Health Routes
// ============================================================================

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: "desk-action",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn ready() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ready",
            service: "desk-action",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

// ============================================================================
// Invocation Route
// ============================================================================

/// Handle one action-group invocation.
///
/// The transport reply is always HTTP 200; the protocol status lives inside
/// the envelope, which is what the runtime parses.
async fn invoke(
    State(state): State<Arc<ActionState>>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    let event = InvocationEvent::from_value(&payload);
    let envelope = handle_invocation(&event, &state.jira).await;
    Json(envelope)
}

// ============================================================================
// Router Builder
// ============================================================================

/// Build the action HTTP router.
pub fn build_router(state: Arc<ActionState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/invoke", post(invoke))
        .with_state(state)
}

/// Create the action state.
pub fn create_state(jira: JiraClient) -> Arc<ActionState> {
    Arc::new(ActionState {
        jira: Arc::new(jira),
    })
}
