//! HTTP client for the Bot API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::wire::{
    AnswerCallbackQuery, ApiResponse, GetUpdates, InboundUpdate, InlineKeyboardMarkup, SendMessage, Update,
};
use crate::domain::conversation::{split_text, Reply, MAX_MESSAGE_CHARS};
use crate::domain::foundation::UserId;
use crate::ports::{GatewayError, MessagingGateway};

/// Configuration for the Bot API client.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    token: Secret<String>,
    pub api_url: String,
    /// Long-poll wait passed to `getUpdates`.
    pub poll_timeout: Duration,
}

impl TelegramConfig {
    pub fn new(token: Secret<String>) -> Self {
        Self {
            token,
            api_url: "https://api.telegram.org".to_string(),
            poll_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url.trim_end_matches('/'),
            self.token.expose_secret(),
            method
        )
    }
}

/// Bot API client implementing the messaging gateway.
#[derive(Clone)]
pub struct TelegramGateway {
    config: TelegramConfig,
    client: Client,
}

impl TelegramGateway {
    pub fn new(config: TelegramConfig) -> Result<Self, GatewayError> {
        // Leave headroom over the long-poll wait so the server answers first.
        let client = Client::builder()
            .timeout(config.poll_timeout + Duration::from_secs(10))
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Long-polls for updates after `offset`.
    pub async fn poll(&self, offset: i64) -> Result<Vec<InboundUpdate>, GatewayError> {
        let body = GetUpdates {
            offset,
            timeout: self.config.poll_timeout.as_secs(),
            allowed_updates: &["message", "callback_query"],
        };
        let updates: Vec<Update> = self.call("getUpdates", &body).await?;
        Ok(updates.into_iter().map(InboundUpdate::from).collect())
    }

    /// Acknowledges a button press.
    pub async fn answer_callback(&self, callback_query_id: &str) -> Result<(), GatewayError> {
        let body = AnswerCallbackQuery { callback_query_id };
        let _: bool = self.call("answerCallbackQuery", &body).await?;
        Ok(())
    }

    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(&self, method: &str, body: &B) -> Result<T, GatewayError> {
        let response = self
            .client
            .post(self.config.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("{} request failed: {}", method, e.without_url())))?;

        let parsed: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(format!("{} response unreadable: {}", method, e.without_url())))?;

        match (parsed.ok, parsed.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(GatewayError::Rejected(format!(
                "{}: {}",
                method,
                parsed.description.unwrap_or_else(|| "no description".to_string())
            ))),
        }
    }
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    /// Sends the reply, splitting long text; buttons go on the last piece.
    async fn send(&self, to: UserId, reply: &Reply) -> Result<(), GatewayError> {
        let pieces = split_text(&reply.text, MAX_MESSAGE_CHARS);
        let last = pieces.len() - 1;
        for (i, piece) in pieces.iter().enumerate() {
            let body = SendMessage {
                chat_id: to.as_i64(),
                text: piece,
                reply_markup: if i == last {
                    InlineKeyboardMarkup::from_reply(reply)
                } else {
                    None
                },
            };
            let _: serde_json::Value = self.call("sendMessage", &body).await?;
        }
        Ok(())
    }
}
