//! Route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::webhook_secret_middleware};

pub mod health;
pub mod webhook;

/// Creates the router with the webhook behind the secret check.
#[allow(clippy::needless_pass_by_value)]
pub fn routes_with_state(state: AppState) -> Router<AppState> {
    let webhook_routes = webhook::routes().layer(middleware::from_fn_with_state(
        state.clone(),
        webhook_secret_middleware,
    ));

    Router::new().merge(health::routes()).merge(webhook_routes)
}
