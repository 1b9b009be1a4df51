//! Flow handlers: one function per (state, intent) pair.
//!
//! Handlers receive the explicit [`HandlerContext`] and the user's
//! session, and return the replies to send plus the transition to apply.
//! They never touch the session registry; the engine commits the session
//! only after a handler finished without error.
//!
//! - `navigation` - start, cancel, main menu, language choice
//! - `ordering` - browsing, quantity entry, cart, checkout, history
//! - `catalog_admin` - add, edit, toggle and delete products
//! - `order_admin` - order overview, shopping list, completion, clearing

mod catalog_admin;
mod navigation;
mod order_admin;
mod ordering;

use super::context::HandlerContext;
use crate::domain::conversation::{Action, Command, DialogState, Inbound, Intent, Reply, Session, Transition};
use crate::domain::foundation::DomainError;

/// Handler result: replies in send order and the session transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub replies: Vec<Reply>,
    pub transition: Transition,
}

impl Step {
    /// Move to `state` after sending `replies`.
    pub fn to(state: DialogState, replies: Vec<Reply>) -> Self {
        Self {
            replies,
            transition: Transition::Continue(state),
        }
    }

    /// Remain in the session's current state.
    pub fn stay(session: &Session, replies: Vec<Reply>) -> Self {
        Self::to(session.state, replies)
    }

    /// End the active flow.
    pub fn terminate(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            transition: Transition::Terminate,
        }
    }
}

/// Routes an accepted intent to its handler.
///
/// The engine has already checked admin rights and that the current
/// state accepts the intent.
pub async fn dispatch(ctx: &HandlerContext, session: &mut Session, inbound: &Inbound) -> Result<Step, DomainError> {
    let profile = &inbound.profile;
    match &inbound.intent {
        Intent::Command(Command::Start) => Ok(navigation::start(ctx, session, profile).await),
        Intent::Command(Command::Cancel) => Ok(navigation::cancel(ctx, session, profile)),
        Intent::Command(Command::Admin) => Ok(catalog_admin::panel(ctx, session)),
        Intent::Text(text) => match session.state {
            DialogState::SelectQuantity => Ok(ordering::enter_quantity(ctx, session, text)),
            DialogState::AddProductName => Ok(catalog_admin::enter_name(ctx, session, text)),
            DialogState::AddProductPrice => catalog_admin::enter_price(ctx, session, text).await,
            DialogState::EditPrice => catalog_admin::enter_new_price(ctx, session, text).await,
            _ => Ok(navigation::unrecognised(ctx, session)),
        },
        Intent::Action(action) => match action {
            Action::MainMenu => Ok(navigation::main_menu(ctx, session, profile)),
            Action::SelectLanguage => Ok(navigation::language_menu(ctx, session)),
            Action::SetLanguage(code) => navigation::set_language(ctx, session, profile, code).await,

            Action::Browse | Action::AddMore => ordering::browse(ctx, session).await,
            Action::SelectProduct(id) => ordering::select_product(ctx, session, *id).await,
            Action::ViewCart => Ok(ordering::view_cart(ctx, session)),
            Action::RemoveItem(index) => Ok(ordering::remove_item(ctx, session, *index)),
            Action::Checkout => Ok(ordering::checkout(ctx, session, profile).await),
            Action::MyOrders => ordering::my_orders(ctx, session).await,

            Action::AdminPanel => Ok(catalog_admin::panel(ctx, session)),
            Action::AdminAddProduct => Ok(catalog_admin::start_add(ctx, session)),
            Action::AdminManageList => catalog_admin::manage_list(ctx, session).await,
            Action::AdminSelectProduct(id) => catalog_admin::select(ctx, session, *id).await,
            Action::AdminEditPrice => catalog_admin::start_price_edit(ctx, session).await,
            Action::AdminToggleAvailability => catalog_admin::toggle(ctx, session).await,
            Action::AdminDeleteProduct => catalog_admin::start_delete(ctx, session).await,
            Action::AdminDeleteConfirm => catalog_admin::confirm_delete(ctx, session).await,

            Action::AdminViewOrders => order_admin::view_orders(ctx, session).await,
            Action::AdminShoppingList => order_admin::shopping_list(ctx, session).await,
            Action::AdminCompleteOrder(id) => order_admin::complete(ctx, session, *id).await,
            Action::AdminClearOrders => Ok(order_admin::confirm_clear(ctx, session)),
            Action::AdminClearOrdersConfirm => Ok(order_admin::clear(ctx, session).await),
        },
    }
}
