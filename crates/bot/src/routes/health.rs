//! Liveness endpoint for the bot process.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::error;

use crate::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy` when the ledger database answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version of the running bot.
    pub version: &'static str,
    /// Whether the SQLite connection responded to a ping.
    pub database: bool,
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.commands.store().connection().ping().await {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "Ledger database did not answer health ping");
            false
        }
    };

    let (code, status) = if database {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

/// `GET /health`, outside the webhook secret check.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
