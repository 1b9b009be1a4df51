//! Inbound intents: slash commands, button actions and free text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{LanguageCode, OrderId, ProductId, ValidationError};
use crate::domain::user::UserProfile;

/// Slash commands accepted in every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Admin,
    Cancel,
}

impl Command {
    /// Parses `/start`, `/admin` or `/cancel`, ignoring a `@botname`
    /// suffix and trailing arguments.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim().split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "admin" => Some(Command::Admin),
            "cancel" => Some(Command::Cancel),
            _ => None,
        }
    }
}

/// A button press, carrying at most one embedded parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MainMenu,
    Browse,
    ViewCart,
    MyOrders,
    SelectLanguage,
    SetLanguage(LanguageCode),
    SelectProduct(ProductId),
    AddMore,
    /// Zero-based cart line position.
    RemoveItem(usize),
    Checkout,

    AdminPanel,
    AdminAddProduct,
    AdminManageList,
    AdminViewOrders,
    AdminShoppingList,
    AdminClearOrders,
    AdminClearOrdersConfirm,
    AdminSelectProduct(ProductId),
    AdminEditPrice,
    AdminToggleAvailability,
    AdminDeleteProduct,
    AdminDeleteConfirm,
    AdminCompleteOrder(OrderId),
}

impl Action {
    /// Actions that restart navigation from any state.
    pub fn is_top_level(&self) -> bool {
        matches!(self, Action::MainMenu | Action::AdminPanel)
    }

    /// Actions only administrators may perform.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Action::AdminPanel
                | Action::AdminAddProduct
                | Action::AdminManageList
                | Action::AdminViewOrders
                | Action::AdminShoppingList
                | Action::AdminClearOrders
                | Action::AdminClearOrdersConfirm
                | Action::AdminSelectProduct(_)
                | Action::AdminEditPrice
                | Action::AdminToggleAvailability
                | Action::AdminDeleteProduct
                | Action::AdminDeleteConfirm
                | Action::AdminCompleteOrder(_)
        )
    }

    /// Encodes the action as compact callback data.
    pub fn encode(&self) -> String {
        match self {
            Action::MainMenu => "menu".into(),
            Action::Browse => "browse".into(),
            Action::ViewCart => "cart".into(),
            Action::MyOrders => "orders".into(),
            Action::SelectLanguage => "lang".into(),
            Action::SetLanguage(code) => format!("lang:{}", code),
            Action::SelectProduct(id) => format!("prod:{}", id),
            Action::AddMore => "more".into(),
            Action::RemoveItem(index) => format!("rm:{}", index),
            Action::Checkout => "checkout".into(),
            Action::AdminPanel => "admin".into(),
            Action::AdminAddProduct => "a:add".into(),
            Action::AdminManageList => "a:manage".into(),
            Action::AdminViewOrders => "a:orders".into(),
            Action::AdminShoppingList => "a:shop".into(),
            Action::AdminClearOrders => "a:clear".into(),
            Action::AdminClearOrdersConfirm => "a:clear:yes".into(),
            Action::AdminSelectProduct(id) => format!("a:prod:{}", id),
            Action::AdminEditPrice => "a:price".into(),
            Action::AdminToggleAvailability => "a:toggle".into(),
            Action::AdminDeleteProduct => "a:del".into(),
            Action::AdminDeleteConfirm => "a:del:yes".into(),
            Action::AdminCompleteOrder(id) => format!("a:done:{}", id),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let bad_param = |p: &str| ValidationError::invalid_format("callback_data", format!("bad parameter in '{}': '{}'", data, p));

        let action = match data {
            "menu" => Action::MainMenu,
            "browse" => Action::Browse,
            "cart" => Action::ViewCart,
            "orders" => Action::MyOrders,
            "lang" => Action::SelectLanguage,
            "more" => Action::AddMore,
            "checkout" => Action::Checkout,
            "admin" => Action::AdminPanel,
            "a:add" => Action::AdminAddProduct,
            "a:manage" => Action::AdminManageList,
            "a:orders" => Action::AdminViewOrders,
            "a:shop" => Action::AdminShoppingList,
            "a:clear" => Action::AdminClearOrders,
            "a:clear:yes" => Action::AdminClearOrdersConfirm,
            "a:price" => Action::AdminEditPrice,
            "a:toggle" => Action::AdminToggleAvailability,
            "a:del" => Action::AdminDeleteProduct,
            "a:del:yes" => Action::AdminDeleteConfirm,
            _ => {
                let (prefix, param) = data
                    .rsplit_once(':')
                    .ok_or_else(|| ValidationError::invalid_format("callback_data", format!("unknown action '{}'", data)))?;
                match prefix {
                    "lang" => Action::SetLanguage(LanguageCode::new(param)?),
                    "prod" => Action::SelectProduct(param.parse().map_err(|_| bad_param(param))?),
                    "rm" => Action::RemoveItem(param.parse().map_err(|_| bad_param(param))?),
                    "a:prod" => Action::AdminSelectProduct(param.parse().map_err(|_| bad_param(param))?),
                    "a:done" => Action::AdminCompleteOrder(param.parse().map_err(|_| bad_param(param))?),
                    _ => {
                        return Err(ValidationError::invalid_format(
                            "callback_data",
                            format!("unknown action '{}'", data),
                        ))
                    }
                }
            }
        };
        Ok(action)
    }
}

/// A normalized inbound user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Command(Command),
    Action(Action),
    Text(String),
}

impl Intent {
    /// Classifies a text message as a command or free text.
    pub fn from_text(text: &str) -> Self {
        match Command::parse(text) {
            Some(cmd) => Intent::Command(cmd),
            None => Intent::Text(text.to_string()),
        }
    }

    /// Decodes button callback data.
    pub fn from_callback(data: &str) -> Result<Self, ValidationError> {
        Ok(Intent::Action(data.parse()?))
    }

    /// Intents that are handled in every state regardless of context.
    pub fn is_top_level(&self) -> bool {
        match self {
            Intent::Command(_) => true,
            Intent::Action(action) => action.is_top_level(),
            Intent::Text(_) => false,
        }
    }

    /// Intents only administrators may issue.
    pub fn requires_admin(&self) -> bool {
        match self {
            Intent::Command(cmd) => *cmd == Command::Admin,
            Intent::Action(action) => action.requires_admin(),
            Intent::Text(_) => false,
        }
    }

    /// Short label for logs; never includes free text.
    pub fn kind(&self) -> String {
        match self {
            Intent::Command(c) => format!("command:{:?}", c).to_lowercase(),
            Intent::Action(a) => format!("action:{}", a.encode()),
            Intent::Text(_) => "text".to_string(),
        }
    }
}

/// An intent together with the sender's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub profile: UserProfile,
    pub intent: Intent,
}

impl Inbound {
    pub fn new(profile: UserProfile, intent: Intent) -> Self {
        Self { profile, intent }
    }
}
