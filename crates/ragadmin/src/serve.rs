// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ragadmin serve` command implementation.
//!
//! Runs the axum gateway exposing assistant creation and the reconcile
//! trigger. Reconciliation cadence is external: a cron job (or any timer)
//! hits POST /api/reconcile on its own schedule.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use ragadmin_config::RagAdminConfig;
use ragadmin_core::RagAdminError;
use ragadmin_provision::Orchestrator;
use ragadmin_reconcile::Reconciler;

use crate::app;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub orchestrator: Arc<Orchestrator>,
    pub reconciler: Arc<Reconciler>,
}

/// Build the admin API router.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/assistants", post(handlers::post_assistants))
        .route("/api/reconcile", post(handlers::post_reconcile))
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the admin HTTP server and serve until the process exits.
pub async fn run(config: &RagAdminConfig) -> Result<(), RagAdminError> {
    let app = app::build(config).await?;
    let state = GatewayState {
        orchestrator: app.orchestrator,
        reconciler: app.reconciler,
    };
    let router = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RagAdminError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    info!("admin gateway listening on {addr}");

    axum::serve(listener, router)
        .await
        .map_err(|e| RagAdminError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
