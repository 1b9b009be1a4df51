//! Order records: status lifecycle, commit input and ledger read models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Cart, LedgerError};
use crate::domain::foundation::{
    subtotal, OrderId, Price, ProductId, Quantity, StateMachine, Timestamp, UserId, ValidationError,
};

/// Lifecycle of a committed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Completed => "completed",
        }
    }

    /// Returns true while the order still counts toward outstanding demand.
    pub fn is_outstanding(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Pending, Confirmed) | (Pending, Completed) | (Confirmed, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![Confirmed, Completed],
            Confirmed => vec![Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown order status '{}'", other),
            )),
        }
    }
}

/// One line of an order about to be committed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: Quantity,
    pub unit_price: Price,
}

impl NewOrderLine {
    pub fn subtotal(&self) -> f64 {
        subtotal(self.unit_price, self.quantity)
    }
}

/// A header plus lines, committed to the ledger as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub user_name: String,
    pub lines: Vec<NewOrderLine>,
    pub total: f64,
}

impl NewOrder {
    /// Snapshots a non-empty cart into an order.
    pub fn from_cart(user_id: UserId, user_name: &str, cart: &Cart) -> Result<Self, LedgerError> {
        if cart.is_empty() {
            return Err(LedgerError::EmptyOrder);
        }
        let lines = cart
            .lines()
            .iter()
            .map(|l| NewOrderLine {
                product_id: l.product_id,
                product_name: l.name.clone(),
                quantity: l.quantity,
                unit_price: l.price,
            })
            .collect();
        Ok(Self {
            user_id,
            user_name: user_name.to_string(),
            lines,
            total: cart.total(),
        })
    }
}

/// A stored order line joined with its product name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    /// Current catalog name, or `#<id>` if the product was deleted.
    pub product_name: String,
    pub quantity: Quantity,
    pub unit_price: Price,
}

/// An order header with its items, as returned by history queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub user_id: UserId,
    pub user_name: String,
    pub created_at: Timestamp,
    pub total: f64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

/// Outstanding demand for one product across pending and confirmed orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListEntry {
    pub product_name: String,
    pub total_quantity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod status {
        use super::*;

        #[test]
        fn outstanding_orders_can_be_completed() {
            assert!(OrderStatus::Pending.can_transition_to(&OrderStatus::Completed));
            assert!(OrderStatus::Confirmed.can_transition_to(&OrderStatus::Completed));
        }

        #[test]
        fn completed_is_terminal() {
            assert!(OrderStatus::Completed.is_terminal());
            assert!(OrderStatus::Completed.transition_to(OrderStatus::Pending).is_err());
        }

        #[test]
        fn confirmed_cannot_return_to_pending() {
            assert!(!OrderStatus::Confirmed.can_transition_to(&OrderStatus::Pending));
        }

        #[test]
        fn only_completed_is_not_outstanding() {
            assert!(OrderStatus::Pending.is_outstanding());
            assert!(OrderStatus::Confirmed.is_outstanding());
            assert!(!OrderStatus::Completed.is_outstanding());
        }

        #[test]
        fn parses_stored_text() {
            for s in [OrderStatus::Pending, OrderStatus::Confirmed, OrderStatus::Completed] {
                assert_eq!(s.as_str().parse::<OrderStatus>().unwrap(), s);
            }
            assert!("shipped".parse::<OrderStatus>().is_err());
        }
    }

    mod from_cart {
        use super::*;

        #[test]
        fn empty_cart_is_rejected() {
            let result = NewOrder::from_cart(UserId::new(1), "Ann", &Cart::new());
            assert!(matches!(result, Err(LedgerError::EmptyOrder)));
        }

        #[test]
        fn snapshots_lines_and_total() {
            let mut cart = Cart::new();
            cart.add_or_merge(
                ProductId::new(3),
                "Plums",
                Price::try_new(2.0).unwrap(),
                Quantity::try_new(1.5).unwrap(),
            );

            let order = NewOrder::from_cart(UserId::new(1), "Ann", &cart).unwrap();

            assert_eq!(order.lines.len(), 1);
            assert_eq!(order.lines[0].product_id, ProductId::new(3));
            assert_eq!(order.lines[0].subtotal(), 3.0);
            assert_eq!(order.total, 3.0);
            assert_eq!(order.user_name, "Ann");
        }
    }
}
