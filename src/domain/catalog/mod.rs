//! Catalog module - products sold by weight.

mod errors;
mod product;

pub use errors::CatalogError;
pub use product::{validate_name, ListFilter, NewProduct, Product, ProductUpdate};
