//! Start, cancel, main menu and language selection.

use super::Step;
use crate::application::context::HandlerContext;
use crate::application::views;
use crate::domain::conversation::{DialogState, Session};
use crate::domain::foundation::{DomainError, LanguageCode};
use crate::domain::i18n::MessageArg;
use crate::domain::user::UserProfile;

/// `/start`: refreshes the user record and shows the main menu.
///
/// Language and cart survive; any in-progress flow is dropped. A failing
/// user store is logged and the session keeps its current language.
pub async fn start(ctx: &HandlerContext, session: &mut Session, profile: &UserProfile) -> Step {
    match ctx
        .users
        .ensure(profile, session.is_admin, ctx.phrases.default_language())
        .await
    {
        Ok(user) if ctx.phrases.supports(&user.language) => session.language = user.language,
        Ok(_) => {}
        Err(e) => {
            tracing::error!(user_id = %session.user_id, error = %e, "Failed to refresh user on start");
        }
    }
    session.clear_slots();

    let p = ctx.phrases_for(&session.language);
    Step::terminate(vec![views::main_menu(&p, profile)])
}

/// `/cancel`: drops the active flow and returns home.
pub fn cancel(ctx: &HandlerContext, session: &mut Session, profile: &UserProfile) -> Step {
    session.clear_slots();
    let p = ctx.phrases_for(&session.language);
    let replies = vec![views::notice(&p, "action_cancelled", &[]), views::home(&p, session, profile)];
    match session.home_state() {
        DialogState::AdminMain => Step::to(DialogState::AdminMain, replies),
        _ => Step::terminate(replies),
    }
}

pub fn main_menu(ctx: &HandlerContext, session: &Session, profile: &UserProfile) -> Step {
    let p = ctx.phrases_for(&session.language);
    Step::terminate(vec![views::main_menu(&p, profile)])
}

pub fn language_menu(ctx: &HandlerContext, session: &Session) -> Step {
    let p = ctx.phrases_for(&session.language);
    Step::to(
        DialogState::LanguageSelect,
        vec![views::language_menu(&p, &ctx.phrases.languages())],
    )
}

/// Persists the chosen language and re-renders the main menu in it.
pub async fn set_language(
    ctx: &HandlerContext,
    session: &mut Session,
    profile: &UserProfile,
    code: &LanguageCode,
) -> Result<Step, DomainError> {
    if !ctx.phrases.supports(code) {
        let p = ctx.phrases_for(&session.language);
        return Ok(Step::stay(
            session,
            vec![
                views::notice(&p, "language_not_available", &[MessageArg::new("code", code)]),
                views::language_menu(&p, &ctx.phrases.languages()),
            ],
        ));
    }

    ctx.users.set_language(session.user_id, code).await?;
    session.language = code.clone();
    tracing::info!(user_id = %session.user_id, language = %code, "Language changed");

    let p = ctx.phrases_for(&session.language);
    let name = p.t(crate::domain::i18n::LANGUAGE_NAME_KEY);
    Ok(Step::to(
        DialogState::MainMenu,
        vec![
            views::notice(&p, "language_set_to", &[MessageArg::new("language_name", name)]),
            views::main_menu(&p, profile),
        ],
    ))
}

/// Free text where none is expected.
pub fn unrecognised(ctx: &HandlerContext, session: &Session) -> Step {
    let p = ctx.phrases_for(&session.language);
    Step::stay(session, vec![views::notice(&p, "unrecognised_input", &[])])
}
