//! Per-user conversation session.

use serde::{Deserialize, Serialize};

use super::{DialogState, Transition};
use crate::domain::foundation::{LanguageCode, Price, ProductId, StateMachine, UserId, ValidationError};
use crate::domain::ordering::Cart;

/// Product picked in the browse step, awaiting a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

/// Ephemeral values carried between steps of one flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slots {
    pub selected_product: Option<SelectedProduct>,
    pub pending_product_name: Option<String>,
    pub editing_product: Option<ProductId>,
}

impl Slots {
    pub fn is_empty(&self) -> bool {
        self.selected_product.is_none() && self.pending_product_name.is_none() && self.editing_product.is_none()
    }
}

/// One user's dialog: state tag, slots and exclusively owned cart.
///
/// `cart` is `None` until the first add; an empty cart is `Some`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub language: LanguageCode,
    pub is_admin: bool,
    pub state: DialogState,
    pub slots: Slots,
    pub cart: Option<Cart>,
}

impl Session {
    pub fn new(user_id: UserId, language: LanguageCode, is_admin: bool) -> Self {
        Self {
            user_id,
            language,
            is_admin,
            state: DialogState::MainMenu,
            slots: Slots::default(),
            cart: None,
        }
    }

    /// Returns the cart, creating it on first use.
    pub fn cart_mut(&mut self) -> &mut Cart {
        self.cart.get_or_insert_with(Cart::new)
    }

    /// Returns the cart, or `None` if nothing was ever added.
    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    /// Returns true when the cart is missing or has no lines.
    pub fn cart_is_empty(&self) -> bool {
        self.cart.as_ref().map_or(true, Cart::is_empty)
    }

    /// Clears flow slots, keeping language and cart.
    pub fn clear_slots(&mut self) {
        self.slots = Slots::default();
    }

    /// Menu a cancelled flow returns to.
    pub fn home_state(&self) -> DialogState {
        if self.is_admin {
            DialogState::AdminMain
        } else {
            DialogState::MainMenu
        }
    }

    /// Applies a handler outcome to the session.
    pub fn apply(&mut self, transition: Transition) -> Result<(), ValidationError> {
        match transition {
            Transition::Continue(next) => {
                self.state = self.state.transition_to(next)?;
            }
            Transition::Terminate => {
                self.state = DialogState::MainMenu;
                self.clear_slots();
            }
        }
        Ok(())
    }
}
