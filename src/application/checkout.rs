//! Checkout: turns a session cart into a committed order.

use std::sync::Arc;

use super::notification::{FanoutHandle, NotificationFanout};
use crate::domain::conversation::Session;
use crate::domain::foundation::OrderId;
use crate::domain::ordering::{LedgerError, NewOrder};
use crate::domain::user::UserProfile;
use crate::ports::OrderLedger;

/// Result of one checkout attempt.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Nothing to order; no ledger call was made.
    EmptyCart,
    /// The order is committed and the cart cleared. Admin notifications
    /// are already running.
    Placed {
        order_id: OrderId,
        total: f64,
        notifications: FanoutHandle,
    },
    /// The ledger rolled back; the cart is unchanged.
    Failed(LedgerError),
}

/// Commits carts through the order ledger and notifies administrators.
#[derive(Clone)]
pub struct CheckoutService {
    ledger: Arc<dyn OrderLedger>,
    fanout: NotificationFanout,
}

impl CheckoutService {
    pub fn new(ledger: Arc<dyn OrderLedger>, fanout: NotificationFanout) -> Self {
        Self { ledger, fanout }
    }

    /// Places the session's cart as an order.
    ///
    /// On success the cart and selected product are cleared. On failure
    /// the session is left untouched so the user can retry.
    pub async fn checkout(&self, session: &mut Session, customer: &UserProfile) -> CheckoutOutcome {
        let order = match session.cart() {
            Some(cart) if !cart.is_empty() => match NewOrder::from_cart(session.user_id, &customer.display_name, cart) {
                Ok(order) => order,
                Err(e) => return CheckoutOutcome::Failed(e),
            },
            _ => return CheckoutOutcome::EmptyCart,
        };

        let order_id = match self.ledger.create_order(&order).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    user_id = %session.user_id,
                    lines = order.lines.len(),
                    error = %e,
                    "Checkout failed, order rolled back"
                );
                return CheckoutOutcome::Failed(e);
            }
        };

        session.cart = None;
        session.slots.selected_product = None;

        tracing::info!(
            user_id = %session.user_id,
            order_id = %order_id,
            total = order.total,
            "Order placed"
        );

        let notifications = self.fanout.notify_new_order(order_id, customer, &order);
        CheckoutOutcome::Placed {
            order_id,
            total: order.total,
            notifications,
        }
    }
}
