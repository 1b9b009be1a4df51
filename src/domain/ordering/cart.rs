//! Cart aggregate - per-session list of selected products.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{subtotal, Price, ProductId, Quantity};

/// One aggregated product selection.
///
/// The unit price is captured when the line is first created and is never
/// refreshed, even if the catalog price changes before checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        subtotal(self.price, self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("No cart line at position {index} (cart has {len} lines)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered cart lines, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quantity of a product.
    ///
    /// An existing line for the product accumulates the quantity and keeps
    /// its stored name and price; otherwise a new line is appended.
    pub fn add_or_merge(&mut self, product_id: ProductId, name: &str, price: Price, quantity: Quantity) {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.plus(quantity),
            None => self.lines.push(CartLine {
                product_id,
                name: name.to_string(),
                price,
                quantity,
            }),
        }
    }

    /// Removes the line at a zero-based position.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn price(v: f64) -> Price {
        Price::try_new(v).unwrap()
    }

    fn qty(v: f64) -> Quantity {
        Quantity::try_new(v).unwrap()
    }

    mod add_or_merge {
        use super::*;

        #[test]
        fn appends_new_product() {
            let mut cart = Cart::new();
            cart.add_or_merge(ProductId::new(1), "Apples", price(2.0), qty(1.5));
            assert_eq!(cart.len(), 1);
            assert_eq!(cart.lines()[0].name, "Apples");
        }

        #[test]
        fn repeated_product_sums_quantity_and_keeps_first_price() {
            let mut cart = Cart::new();
            cart.add_or_merge(ProductId::new(1), "Apples", price(2.0), qty(1.0));
            cart.add_or_merge(ProductId::new(1), "Apples", price(9.0), qty(2.5));

            assert_eq!(cart.len(), 1);
            assert_eq!(cart.lines()[0].quantity.value(), 3.5);
            assert_eq!(cart.lines()[0].price, price(2.0));
        }

        #[test]
        fn keeps_insertion_order() {
            let mut cart = Cart::new();
            cart.add_or_merge(ProductId::new(2), "Pears", price(1.0), qty(1.0));
            cart.add_or_merge(ProductId::new(1), "Apples", price(1.0), qty(1.0));
            cart.add_or_merge(ProductId::new(2), "Pears", price(1.0), qty(1.0));

            let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id).collect();
            assert_eq!(ids, vec![ProductId::new(2), ProductId::new(1)]);
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn removes_by_position() {
            let mut cart = Cart::new();
            cart.add_or_merge(ProductId::new(1), "Apples", price(1.0), qty(1.0));
            cart.add_or_merge(ProductId::new(2), "Pears", price(1.0), qty(1.0));

            let removed = cart.remove(0).unwrap();
            assert_eq!(removed.product_id, ProductId::new(1));
            assert_eq!(cart.len(), 1);
        }

        #[test]
        fn out_of_range_reports_error_and_leaves_cart() {
            let mut cart = Cart::new();
            cart.add_or_merge(ProductId::new(1), "Apples", price(1.0), qty(1.0));
            let before = cart.clone();

            let err = cart.remove(5).unwrap_err();
            assert_eq!(err, CartError::IndexOutOfRange { index: 5, len: 1 });
            assert_eq!(cart, before);
        }

        #[test]
        fn empty_cart_reports_error() {
            assert!(Cart::new().remove(0).is_err());
        }
    }

    #[test]
    fn total_sums_line_subtotals() {
        let mut cart = Cart::new();
        cart.add_or_merge(ProductId::new(1), "Apples", price(2.0), qty(1.5));
        cart.add_or_merge(ProductId::new(2), "Pears", price(4.0), qty(0.5));
        assert!((cart.total() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_or_merge(ProductId::new(1), "Apples", price(2.0), qty(1.0));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    fn additions() -> impl Strategy<Value = Vec<(i64, f64, f64)>> {
        prop::collection::vec((1i64..6, 0.5f64..50.0, 0.1f64..10.0), 0..30)
    }

    proptest! {
        #[test]
        fn at_most_one_line_per_product(adds in additions()) {
            let mut cart = Cart::new();
            for (id, p, q) in &adds {
                cart.add_or_merge(ProductId::new(*id), "item", price(*p), qty(*q));
            }
            let mut ids: Vec<_> = cart.lines().iter().map(|l| l.product_id).collect();
            let len = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), len);
        }

        #[test]
        fn merged_quantity_is_sum_and_price_is_first(adds in additions()) {
            let mut cart = Cart::new();
            for (id, p, q) in &adds {
                cart.add_or_merge(ProductId::new(*id), "item", price(*p), qty(*q));
            }
            for line in cart.lines() {
                let mine: Vec<_> = adds.iter().filter(|(id, _, _)| ProductId::new(*id) == line.product_id).collect();
                let expected_qty: f64 = mine.iter().map(|(_, _, q)| *q).sum();
                prop_assert!((line.quantity.value() - expected_qty).abs() < 1e-6);
                prop_assert_eq!(line.price.value(), mine[0].1);
            }
        }

        #[test]
        fn total_equals_sum_of_subtotals(adds in additions()) {
            let mut cart = Cart::new();
            for (id, p, q) in &adds {
                cart.add_or_merge(ProductId::new(*id), "item", price(*p), qty(*q));
            }
            let expected: f64 = cart.lines().iter().map(|l| l.price.value() * l.quantity.value()).sum();
            prop_assert!((cart.total() - expected).abs() < 1e-6);
        }

        #[test]
        fn out_of_range_removal_is_noop(adds in additions(), extra in 0usize..5) {
            let mut cart = Cart::new();
            for (id, p, q) in &adds {
                cart.add_or_merge(ProductId::new(*id), "item", price(*p), qty(*q));
            }
            let before = cart.clone();
            let index = cart.len() + extra;
            prop_assert!(cart.remove(index).is_err());
            prop_assert_eq!(cart, before);
        }
    }
}
