//! Admin order flows: overview, shopping list, completion and cleanup.

use super::Step;
use crate::application::context::HandlerContext;
use crate::application::views;
use crate::domain::conversation::{DialogState, Session};
use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::i18n::MessageArg;

/// All orders, newest first, with completion buttons for outstanding ones.
pub async fn view_orders(ctx: &HandlerContext, session: &Session) -> Result<Step, DomainError> {
    let orders = ctx.ledger.all_orders().await?;
    let p = ctx.phrases_for(&session.language);
    Ok(Step::to(DialogState::AdminMain, vec![views::all_orders(&p, &orders)]))
}

/// Outstanding quantities per product.
pub async fn shopping_list(ctx: &HandlerContext, session: &Session) -> Result<Step, DomainError> {
    let entries = ctx.ledger.shopping_list().await?;
    let p = ctx.phrases_for(&session.language);
    Ok(Step::to(DialogState::AdminMain, vec![views::shopping_list(&p, &entries)]))
}

/// Marks an outstanding order completed and re-renders the overview.
pub async fn complete(ctx: &HandlerContext, session: &Session, id: OrderId) -> Result<Step, DomainError> {
    let p = ctx.phrases_for(&session.language);
    let order_arg = [MessageArg::new("order_id", id)];

    let notice = match ctx.ledger.mark_completed(id).await {
        Ok(()) => {
            tracing::info!(admin_id = %session.user_id, order_id = %id, "Order completed");
            views::notice(&p, "admin_order_completed", &order_arg)
        }
        Err(e) => {
            tracing::warn!(admin_id = %session.user_id, order_id = %id, error = %e, "Order completion refused");
            views::notice(&p, "admin_order_complete_failed", &order_arg)
        }
    };

    let mut step = view_orders(ctx, session).await?;
    step.replies.insert(0, notice);
    Ok(step)
}

pub fn confirm_clear(ctx: &HandlerContext, session: &Session) -> Step {
    let p = ctx.phrases_for(&session.language);
    Step::to(DialogState::ClearOrdersConfirm, vec![views::clear_orders_confirm(&p)])
}

/// Deletes every completed order; outstanding orders are untouched.
pub async fn clear(ctx: &HandlerContext, session: &Session) -> Step {
    let p = ctx.phrases_for(&session.language);
    let notice = match ctx.ledger.clear_completed().await {
        Ok(0) => views::notice(&p, "admin_orders_cleared_none", &[]),
        Ok(count) => {
            tracing::info!(admin_id = %session.user_id, count, "Completed orders cleared");
            views::notice(&p, "admin_orders_cleared_success", &[MessageArg::new("count", count)])
        }
        Err(e) => {
            tracing::error!(admin_id = %session.user_id, error = %e, "Clearing completed orders failed");
            views::notice(&p, "admin_orders_cleared_error", &[])
        }
    };
    Step::to(DialogState::AdminMain, vec![notice, views::admin_panel(&p)])
}
