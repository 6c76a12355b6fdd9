//! Command layer and Telegram webhook for the Cartera bot.
//!
//! This crate provides:
//! - Chat command parsing and the single-user guard
//! - Dispatch of each command to one balance store operation
//! - Reply rendering (Telegram legacy Markdown)
//! - Axum routes for the Telegram webhook and health checks
//! - A minimal Telegram Bot API client

pub mod commands;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod replies;
pub mod routes;
pub mod service;
pub mod telegram;
pub mod updates;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use commands::Command;
pub use error::CommandError;
pub use guard::Guard;
pub use replies::Reply;
pub use service::CommandService;
pub use telegram::TelegramClient;
pub use updates::SeenUpdates;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Command dispatcher backed by the balance store.
    pub commands: Arc<CommandService>,
    /// Expected value of the webhook secret header, if configured.
    pub webhook_secret: Option<Arc<str>>,
    /// Update ids already handled.
    pub seen_updates: Arc<SeenUpdates>,
}

impl AppState {
    /// Creates the state with an empty redelivery filter.
    #[must_use]
    pub fn new(commands: CommandService, webhook_secret: Option<&str>) -> Self {
        Self {
            commands: Arc::new(commands),
            webhook_secret: webhook_secret.map(Arc::from),
            seen_updates: Arc::new(SeenUpdates::default()),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
