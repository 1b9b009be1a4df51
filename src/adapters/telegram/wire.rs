//! Bot API payloads.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{Inbound, Intent, Reply};
use crate::domain::foundation::UserId;
use crate::domain::user::UserProfile;

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub from: Option<Sender>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: Sender,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl Sender {
    fn profile(&self) -> UserProfile {
        let display_name = match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        };
        UserProfile::new(UserId::new(self.id), display_name, self.username.clone())
    }
}

/// A polled update translated for the engine.
#[derive(Debug, Clone)]
pub struct InboundUpdate {
    pub update_id: i64,
    pub inbound: Option<Inbound>,
    /// Set for button presses; must be answered to stop the client spinner.
    pub callback_query_id: Option<String>,
}

impl From<Update> for InboundUpdate {
    fn from(update: Update) -> Self {
        let mut out = InboundUpdate {
            update_id: update.update_id,
            inbound: None,
            callback_query_id: None,
        };

        if let Some(query) = update.callback_query {
            out.callback_query_id = Some(query.id.clone());
            match query.data.as_deref().map(Intent::from_callback) {
                Some(Ok(intent)) => out.inbound = Some(Inbound::new(query.from.profile(), intent)),
                Some(Err(e)) => {
                    tracing::warn!(user_id = query.from.id, error = %e, "Ignoring undecodable button data")
                }
                None => {}
            }
        } else if let Some(message) = update.message {
            if let (Some(from), Some(text)) = (message.from, message.text) {
                out.inbound = Some(Inbound::new(from.profile(), Intent::from_text(&text)));
            }
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardMarkup {
    pub fn from_reply(reply: &Reply) -> Option<Self> {
        if reply.buttons.is_empty() {
            return None;
        }
        Some(Self {
            inline_keyboard: reply
                .buttons
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|b| InlineKeyboardButton {
                            text: b.label.clone(),
                            callback_data: b.action.encode(),
                        })
                        .collect()
                })
                .collect(),
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdates {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub(crate) struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
}
