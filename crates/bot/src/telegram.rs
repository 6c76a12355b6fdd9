//! Telegram Bot API types and client.
//!
//! Only the fields the bot reads are modelled; unknown fields are ignored.

use cartera_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::replies::Reply;

/// Default Bot API endpoint.
pub const API_BASE_URL: &str = "https://api.telegram.org";

/// An incoming update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Update identifier.
    pub update_id: i64,
    /// New incoming message, if this update carries one.
    #[serde(default)]
    pub message: Option<Message>,
}

/// A chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier inside the chat.
    pub message_id: i64,
    /// Sender; empty for channel posts.
    #[serde(default)]
    pub from: Option<User>,
    /// Chat the message belongs to.
    pub chat: Chat,
    /// Text of the message.
    #[serde(default)]
    pub text: Option<String>,
}

/// A Telegram user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: i64,
    /// True for bots.
    #[serde(default)]
    pub is_bot: bool,
    /// User's first name.
    #[serde(default)]
    pub first_name: String,
}

/// A Telegram chat.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Chat identifier.
    pub id: i64,
}

/// A `sendMessage` call returned as the webhook response body.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    /// Always `sendMessage`.
    pub method: &'static str,
    /// Target chat.
    pub chat_id: i64,
    /// Message text.
    pub text: String,
    /// `Markdown` for legacy Markdown replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
}

impl SendMessage {
    /// Wraps a reply for the given chat.
    #[must_use]
    pub fn reply(chat_id: i64, reply: Reply) -> Self {
        Self {
            method: "sendMessage",
            chat_id,
            parse_mode: reply.markdown.then_some("Markdown"),
            text: reply.text,
        }
    }
}

#[derive(Serialize)]
struct SetWebhookRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_token: Option<&'a str>,
    allowed_updates: [&'static str; 1],
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Minimal Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    /// Creates a client for the public Bot API.
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self::with_base_url(API_BASE_URL, token)
    }

    /// Creates a client against a custom Bot API server.
    #[must_use]
    pub fn with_base_url(base_url: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/bot{token}", base_url.trim_end_matches('/')),
        }
    }

    /// Registers `url` as the webhook for message updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExternalService`] if the request fails or
    /// Telegram refuses it.
    pub async fn set_webhook(&self, url: &str, secret: Option<&str>) -> AppResult<()> {
        let body = SetWebhookRequest {
            url,
            secret_token: secret,
            allowed_updates: ["message"],
        };

        let response: ApiResponse = self
            .http
            .post(format!("{}/setWebhook", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("setWebhook request failed: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("setWebhook bad response: {e}")))?;

        if !response.ok {
            return Err(AppError::ExternalService(format!(
                "setWebhook rejected: {}",
                response.description.unwrap_or_default()
            )));
        }

        info!(url, "Telegram webhook registered");
        Ok(())
    }
}
