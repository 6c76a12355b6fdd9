//! Webhook secret check.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use cartera_shared::AppError;
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// Header Telegram fills with the secret given to `setWebhook`.
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Rejects webhook calls that do not carry the configured secret.
///
/// Without a configured secret every request passes.
pub async fn webhook_secret_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.webhook_secret.as_deref() else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(SECRET_HEADER)
        .and_then(|h| h.to_str().ok());

    if provided == Some(expected) {
        return next.run(request).await;
    }

    warn!(
        header_present = provided.is_some(),
        "Webhook call with invalid secret"
    );
    let err = AppError::Unauthorized("missing or invalid webhook secret".to_string());
    (
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::UNAUTHORIZED),
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}
