//! Conversation module - the per-user dialog state machine and its messages.
//!
//! - `DialogState` - which step of which flow the user is at
//! - `Intent` / `Action` / `Command` - normalized inbound input
//! - `Reply` / `Button` - outbound text plus button rows
//! - `Transition` - handler outcome
//! - `Session` - state, slots and cart for one user

mod intent;
mod reply;
mod session;
mod state;
mod transition;

pub use intent::{Action, Command, Inbound, Intent};
pub use reply::{split_text, Button, Reply, MAX_MESSAGE_CHARS};
pub use session::{SelectedProduct, Session, Slots};
pub use state::DialogState;
pub use transition::Transition;
