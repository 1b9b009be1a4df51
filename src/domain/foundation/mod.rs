//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the ordering domain.

mod errors;
mod ids;
mod language;
mod measure;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OrderId, ProductId, UserId};
pub use language::LanguageCode;
pub use measure::{subtotal, Price, Quantity};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
