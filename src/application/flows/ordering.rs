//! Customer flows: browsing, quantity entry, cart, checkout and history.

use super::Step;
use crate::application::checkout::CheckoutOutcome;
use crate::application::context::HandlerContext;
use crate::application::views;
use crate::domain::catalog::ListFilter;
use crate::domain::conversation::{DialogState, SelectedProduct, Session};
use crate::domain::foundation::{DomainError, ProductId, Quantity};
use crate::domain::user::UserProfile;

/// Lists available products.
pub async fn browse(ctx: &HandlerContext, session: &mut Session) -> Result<Step, DomainError> {
    session.slots.selected_product = None;
    let products = ctx.catalog.list(ListFilter::AvailableOnly).await?;
    let p = ctx.phrases_for(&session.language);
    Ok(Step::to(DialogState::BrowseProducts, vec![views::product_list(&p, &products)]))
}

/// Remembers the chosen product and asks for a quantity.
///
/// A product deleted or hidden since the list was rendered is reported
/// and the list shown again.
pub async fn select_product(ctx: &HandlerContext, session: &mut Session, id: ProductId) -> Result<Step, DomainError> {
    let product = match ctx.catalog.find(id).await? {
        Some(product) if product.is_available => product,
        _ => {
            tracing::debug!(user_id = %session.user_id, product_id = %id, "Stale product selection");
            let products = ctx.catalog.list(ListFilter::AvailableOnly).await?;
            let p = ctx.phrases_for(&session.language);
            return Ok(Step::to(
                DialogState::BrowseProducts,
                vec![views::notice(&p, "product_not_found", &[]), views::product_list(&p, &products)],
            ));
        }
    };

    let selected = SelectedProduct {
        id: product.id,
        name: product.name,
        price: product.price,
    };
    let p = ctx.phrases_for(&session.language);
    let prompt = views::quantity_prompt(&p, &selected);
    session.slots.selected_product = Some(selected);
    Ok(Step::to(DialogState::SelectQuantity, vec![prompt]))
}

/// Parses a quantity and adds the selected product to the cart.
pub fn enter_quantity(ctx: &HandlerContext, session: &mut Session, text: &str) -> Step {
    let language = session.language.clone();
    let p = ctx.phrases_for(&language);

    let quantity = match Quantity::parse(text) {
        Ok(quantity) => quantity,
        Err(e) => {
            tracing::debug!(user_id = %session.user_id, error = %e, "Rejected quantity");
            return Step::stay(session, vec![views::notice(&p, "invalid_quantity_prompt", &[])]);
        }
    };

    let Some(selected) = session.slots.selected_product.take() else {
        tracing::warn!(user_id = %session.user_id, "Quantity entered with no product selected");
        return Step::terminate(vec![views::notice(&p, "generic_error_message", &[])]);
    };

    session
        .cart_mut()
        .add_or_merge(selected.id, &selected.name, selected.price, quantity);
    Step::to(DialogState::BrowseProducts, views::item_added(&p, &selected.name, quantity))
}

pub fn view_cart(ctx: &HandlerContext, session: &Session) -> Step {
    let p = ctx.phrases_for(&session.language);
    Step::to(DialogState::ViewCart, vec![views::cart(&p, session.cart())])
}

/// Removes one cart line by position and re-renders the cart.
pub fn remove_item(ctx: &HandlerContext, session: &mut Session, index: usize) -> Step {
    let removed = session.cart.as_mut().map(|cart| cart.remove(index));
    let p = ctx.phrases_for(&session.language);
    let cart = views::cart(&p, session.cart());

    match removed {
        Some(Ok(line)) => {
            tracing::debug!(user_id = %session.user_id, product = %line.name, "Cart line removed");
            Step::to(DialogState::ViewCart, vec![cart])
        }
        _ => Step::to(
            DialogState::ViewCart,
            vec![views::notice(&p, "invalid_item_to_remove", &[]), cart],
        ),
    }
}

/// Commits the cart as an order.
pub async fn checkout(ctx: &HandlerContext, session: &mut Session, profile: &UserProfile) -> Step {
    let outcome = ctx.checkout.checkout(session, profile).await;
    let p = ctx.phrases_for(&session.language);

    match outcome {
        CheckoutOutcome::EmptyCart => Step::to(DialogState::ViewCart, vec![views::cart(&p, None)]),
        CheckoutOutcome::Placed { order_id, total, .. } => Step::terminate(vec![
            views::order_placed(&p, order_id, total),
            views::main_menu(&p, profile),
        ]),
        CheckoutOutcome::Failed(_) => Step::terminate(views::order_failed(&p)),
    }
}

/// The user's own orders, newest first.
pub async fn my_orders(ctx: &HandlerContext, session: &Session) -> Result<Step, DomainError> {
    let orders = ctx.ledger.user_history(session.user_id).await?;
    let p = ctx.phrases_for(&session.language);
    Ok(Step::to(DialogState::MyOrders, vec![views::my_orders(&p, &orders)]))
}
