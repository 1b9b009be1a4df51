//! Application layer - the session engine and its flow handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//!
//! - `engine` - per-intent entry point, error containment, state commits
//! - `registry` - live sessions keyed by user
//! - `flows` - one handler per state and intent
//! - `views` - rendering of every screen
//! - `checkout` - transactional order commit
//! - `notification` - new-order fanout to administrators

mod checkout;
mod context;
mod engine;
mod errors;
pub mod flows;
mod notification;
mod registry;
pub mod views;

#[cfg(test)]
mod test_support;

pub use checkout::{CheckoutOutcome, CheckoutService};
pub use context::{HandlerContext, Phrases};
pub use engine::SessionEngine;
pub use errors::{EngineError, ErrorCategory};
pub use flows::Step;
pub use notification::{FanoutHandle, NotificationFanout};
pub use registry::{SessionHandle, SessionRegistry};
