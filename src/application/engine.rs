//! Session engine: routes each inbound intent through the user's dialog.
//!
//! One intent is processed at a time per user; the per-session mutex in
//! [`SessionRegistry`] serialises them while other users proceed
//! concurrently. Handlers run against a clone of the session, and the
//! clone replaces the stored session only when the handler finished and
//! its transition was valid. Errors, panics and timeouts leave the stored
//! session exactly as it was.
//!
//! Checkout is not subject to the handler timeout: once the ledger commit
//! starts, its outcome must reach the session, so that step is bounded by
//! the storage timeouts instead.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use uuid::Uuid;

use super::context::HandlerContext;
use super::errors::{EngineError, ErrorCategory};
use super::flows;
use super::registry::SessionRegistry;
use super::views;
use crate::domain::conversation::{Action, DialogState, Inbound, Intent, Reply, Session, Transition};
use crate::domain::foundation::UserId;
use crate::domain::user::UserProfile;

/// Drives every user's dialog state machine.
pub struct SessionEngine {
    ctx: HandlerContext,
    sessions: SessionRegistry,
    handler_timeout: Duration,
}

impl SessionEngine {
    pub fn new(ctx: HandlerContext, handler_timeout: Duration) -> Self {
        Self {
            ctx,
            sessions: SessionRegistry::new(),
            handler_timeout,
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    /// Handles one intent and returns the replies to deliver, in order.
    ///
    /// Never fails: every error is logged and answered with a localized
    /// notice.
    #[tracing::instrument(
        name = "intent",
        skip_all,
        fields(
            user_id = %inbound.profile.id,
            correlation_id = %Uuid::new_v4(),
            intent = %inbound.intent.kind(),
            state = tracing::field::Empty
        )
    )]
    pub async fn handle(&self, inbound: Inbound) -> Vec<Reply> {
        let user_id = inbound.profile.id;
        let is_admin = self.ctx.is_admin(user_id);

        if inbound.intent.requires_admin() && !is_admin {
            return self.refuse_admin(user_id).await;
        }

        let handle = match self.sessions.get(user_id).await {
            Some(handle) => handle,
            None => {
                let session = self.first_contact(&inbound.profile, is_admin).await;
                self.sessions.get_or_insert_with(user_id, || session).await
            }
        };

        let mut stored = handle.lock().await;
        stored.is_admin = is_admin;
        tracing::Span::current().record("state", tracing::field::debug(stored.state));

        if !accepts(stored.state, &inbound.intent) {
            tracing::info!(state = ?stored.state, "Intent not accepted in current state");
            let p = self.ctx.phrases_for(&stored.language);
            return vec![views::notice(&p, "unrecognised_input", &[])];
        }

        let mut working = stored.clone();
        match self.run(&mut working, &inbound).await {
            Ok(replies) => {
                *stored = working;
                replies
            }
            Err(e) => {
                log_failure(&e, stored.state);
                let p = self.ctx.phrases_for(&stored.language);
                vec![views::notice(&p, "generic_error_message", &[])]
            }
        }
    }

    async fn run(&self, session: &mut Session, inbound: &Inbound) -> Result<Vec<Reply>, EngineError> {
        let from = session.state;
        let handler = AssertUnwindSafe(flows::dispatch(&self.ctx, session, inbound)).catch_unwind();

        let outcome = if commits_order(&inbound.intent) {
            handler.await
        } else {
            match tokio::time::timeout(self.handler_timeout, handler).await {
                Ok(outcome) => outcome,
                Err(_) => return Err(EngineError::Timeout(self.handler_timeout.as_secs())),
            }
        };
        let step = match outcome {
            Err(panic) => return Err(EngineError::from_panic(panic)),
            Ok(result) => result?,
        };

        session.apply(step.transition).map_err(EngineError::Transition)?;
        tracing::info!(from = ?from, to = ?session.state, replies = step.replies.len(), "Intent handled");
        Ok(step.replies)
    }

    /// Builds the session for a user seen for the first time.
    ///
    /// A failing user store does not block the dialog; the user simply
    /// starts in the default language.
    async fn first_contact(&self, profile: &UserProfile, is_admin: bool) -> Session {
        let default_language = self.ctx.phrases.default_language();
        let language = match self.ctx.users.ensure(profile, is_admin, default_language).await {
            Ok(user) if self.ctx.phrases.supports(&user.language) => user.language,
            Ok(user) => {
                tracing::warn!(language = %user.language, "Stored language not loaded, using default");
                default_language.clone()
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to register user, using default language");
                default_language.clone()
            }
        };
        tracing::info!(language = %language, is_admin, "Session created");
        Session::new(profile.id, language, is_admin)
    }

    /// Rejects an admin intent from a non-admin.
    ///
    /// An existing session is sent back to the main menu; no session is
    /// created for an unknown user.
    async fn refuse_admin(&self, user_id: UserId) -> Vec<Reply> {
        tracing::warn!(category = ?ErrorCategory::Authorization, "Non-admin attempted an admin intent");

        let language = match self.sessions.get(user_id).await {
            Some(handle) => {
                let mut session = handle.lock().await;
                if let Err(e) = session.apply(Transition::Terminate) {
                    tracing::error!(error = %e, "Failed to reset session after refused admin intent");
                }
                session.language.clone()
            }
            None => self.ctx.phrases.default_language().clone(),
        };

        let p = self.ctx.phrases_for(&language);
        vec![views::notice(&p, "admin_unauthorized", &[])]
    }
}

fn accepts(state: DialogState, intent: &Intent) -> bool {
    match intent {
        Intent::Command(_) => true,
        Intent::Action(action) => state.accepts_action(action),
        Intent::Text(_) => state.accepts_text(),
    }
}

/// Intents whose handler may commit an order.
fn commits_order(intent: &Intent) -> bool {
    matches!(intent, Intent::Action(Action::Checkout))
}

fn log_failure(error: &EngineError, state: DialogState) {
    match error.category() {
        ErrorCategory::Validation | ErrorCategory::NotFound => {
            tracing::warn!(category = ?error.category(), state = ?state, error = %error, "Intent failed")
        }
        category => tracing::error!(category = ?category, state = ?state, error = %error, "Intent failed"),
    }
}
