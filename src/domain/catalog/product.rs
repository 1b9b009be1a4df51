//! Product entity and catalog edit types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Price, ProductId, ValidationError};

const MAX_NAME_LEN: usize = 100;

/// A catalog item sold by weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub is_available: bool,
}

/// Validated input for creating a product. New products start available.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    price: Price,
}

impl NewProduct {
    pub fn new(name: &str, price: Price) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

/// Partial update of a product. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub is_available: Option<bool>,
}

impl ProductUpdate {
    pub fn price(price: Price) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }

    pub fn rename(name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Some(validate_name(name)?),
            ..Default::default()
        })
    }

    pub fn availability(is_available: bool) -> Self {
        Self {
            is_available: Some(is_available),
            ..Default::default()
        }
    }

    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.is_available.is_none()
    }
}

/// Which products a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    /// Customer browsing.
    AvailableOnly,
    /// Admin management.
    All,
}

/// Trims and checks a product name.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::invalid_format(
            "name",
            format!("must be at most {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(trimmed.to_string())
}
