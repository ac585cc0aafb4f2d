// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the admin REST API.
//!
//! Handles POST /api/assistants, POST /api/reconcile, GET /health.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use ragadmin_core::types::CreateAssistantRequest;

use crate::serve::GatewayState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description, as specific as the failure allows.
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// POST /api/assistants
///
/// Creates an assistant and one remote container per provider type.
/// Failures surface the most specific available message with a 400.
pub async fn post_assistants(
    State(state): State<GatewayState>,
    Json(request): Json<CreateAssistantRequest>,
) -> Response {
    match state.orchestrator.create_assistant(request).await {
        Ok(assistant) => (StatusCode::OK, Json(assistant)).into_response(),
        Err(err) => {
            error!(error = %err, "assistant creation failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.client_message(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/reconcile
///
/// Runs one reconciliation pass and returns the aggregate summary.
/// Per-container failures live inside the summary; only a failure to run
/// the pass at all is an error.
pub async fn post_reconcile(State(state): State<GatewayState>) -> Response {
    match state.reconciler.process_unconfigured_containers().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => {
            error!(error = %err, "reconciliation pass failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.client_message(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
