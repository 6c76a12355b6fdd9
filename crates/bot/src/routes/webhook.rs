//! Telegram webhook endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{debug, warn};

use crate::{
    AppState,
    telegram::{SendMessage, Update},
};

/// Creates the webhook route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/telegram/webhook", post(receive_update))
}

/// Handles one update.
///
/// The reply travels back in the response body as a `sendMessage` call, so
/// no outbound request is needed. Updates without a reply get an empty 200,
/// and so do redeliveries of an update that was already handled.
async fn receive_update(State(state): State<AppState>, Json(update): Json<Update>) -> Response {
    if !state.seen_updates.first_delivery(update.update_id) {
        warn!(update_id = update.update_id, "Ignoring redelivered update");
        return StatusCode::OK.into_response();
    }

    let Some(message) = update.message else {
        debug!(update_id = update.update_id, "Ignoring update without message");
        return StatusCode::OK.into_response();
    };

    let (Some(from), Some(text)) = (message.from.as_ref(), message.text.as_deref()) else {
        return StatusCode::OK.into_response();
    };

    match state.commands.handle(from.id, text).await {
        Some(reply) => Json(SendMessage::reply(message.chat.id, reply)).into_response(),
        None => StatusCode::OK.into_response(),
    }
}
