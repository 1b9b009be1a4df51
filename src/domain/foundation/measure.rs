//! Price and quantity value objects.
//!
//! Both are strictly positive, finite reals. Chat input may use either a
//! decimal point or a decimal comma (`1.5` and `1,5` are the same value).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Unit price of a product (per kilogram).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Creates a Price, returning error unless the value is positive and finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        ensure_positive("price", value)?;
        Ok(Self(value))
    }

    /// Parses free-text chat input into a Price.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::try_new(parse_decimal("price", input)?)
    }

    /// Rebuilds a Price read back from storage without validation.
    pub fn from_stored(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Ordered amount of a product (kilograms).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(f64);

impl Quantity {
    /// Creates a Quantity, returning error unless the value is positive and finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        ensure_positive("quantity", value)?;
        Ok(Self(value))
    }

    /// Parses free-text chat input into a Quantity.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::try_new(parse_decimal("quantity", input)?)
    }

    /// Rebuilds a Quantity read back from storage without validation.
    pub fn from_stored(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the sum of two quantities.
    pub fn plus(&self, other: Quantity) -> Quantity {
        Self(self.0 + other.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns price times quantity.
pub fn subtotal(price: Price, quantity: Quantity) -> f64 {
    price.0 * quantity.0
}

fn parse_decimal(field: &str, input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is not a number", trimmed)))
}

fn ensure_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::invalid_format(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(ValidationError::not_positive(field, value));
    }
    Ok(())
}
