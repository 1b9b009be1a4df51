//! Handler outcome: stay in the flow or end it.

use super::DialogState;

/// What a handler asks the engine to do with the session afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to (or remain in) the given state.
    Continue(DialogState),
    /// End the active flow: back to the main menu with slots cleared.
    Terminate,
}

impl Transition {
    /// The state the session lands in.
    pub fn target(&self) -> DialogState {
        match self {
            Transition::Continue(state) => *state,
            Transition::Terminate => DialogState::MainMenu,
        }
    }
}
