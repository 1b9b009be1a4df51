//! Admin catalog flows: add, reprice, toggle and delete products.
//!
//! The product being managed lives in the `editing_product` slot. Every
//! step re-reads it from the catalog; if it vanished in the meantime the
//! admin is told and sent back to the product list.

use super::Step;
use crate::application::context::HandlerContext;
use crate::application::views;
use crate::domain::catalog::{validate_name, CatalogError, ListFilter, NewProduct, Product, ProductUpdate};
use crate::domain::conversation::{Action, DialogState, Reply, Session};
use crate::domain::foundation::{DomainError, Price, ProductId};
use crate::domain::i18n::MessageArg;

/// Opens the admin panel, dropping any in-progress admin flow.
pub fn panel(ctx: &HandlerContext, session: &mut Session) -> Step {
    session.clear_slots();
    let p = ctx.phrases_for(&session.language);
    Step::to(DialogState::AdminMain, vec![views::admin_panel(&p)])
}

pub fn start_add(ctx: &HandlerContext, session: &mut Session) -> Step {
    session.clear_slots();
    let p = ctx.phrases_for(&session.language);
    let prompt = Reply::text(p.t("admin_enter_product_name"))
        .with_button(p.t("admin_back_to_admin_panel_button"), Action::AdminPanel);
    Step::to(DialogState::AddProductName, vec![prompt])
}

pub fn enter_name(ctx: &HandlerContext, session: &mut Session, text: &str) -> Step {
    let language = session.language.clone();
    let p = ctx.phrases_for(&language);
    match validate_name(text) {
        Ok(name) => {
            let prompt = views::notice(&p, "admin_enter_product_price", &[MessageArg::new("product_name", &name)]);
            session.slots.pending_product_name = Some(name);
            Step::to(DialogState::AddProductPrice, vec![prompt])
        }
        Err(_) => Step::stay(session, vec![views::notice(&p, "admin_invalid_product_name", &[])]),
    }
}

/// Creates the product named in the previous step.
pub async fn enter_price(ctx: &HandlerContext, session: &mut Session, text: &str) -> Result<Step, DomainError> {
    let language = session.language.clone();
    let p = ctx.phrases_for(&language);

    let price = match Price::parse(text) {
        Ok(price) => price,
        Err(_) => return Ok(Step::stay(session, vec![views::notice(&p, "admin_invalid_price", &[])])),
    };
    let Some(name) = session.slots.pending_product_name.take() else {
        tracing::warn!(user_id = %session.user_id, "Price entered with no pending product name");
        return Ok(Step::to(
            DialogState::AdminMain,
            vec![views::notice(&p, "generic_error_message", &[]), views::admin_panel(&p)],
        ));
    };

    let name_arg = [MessageArg::new("product_name", &name)];
    let outcome = match NewProduct::new(&name, price) {
        Ok(product) => ctx.catalog.create(&product).await,
        Err(e) => Err(CatalogError::from(e)),
    };
    let notice = match outcome {
        Ok(product) => {
            tracing::info!(admin_id = %session.user_id, product_id = %product.id, name = %product.name, "Product added");
            views::notice(
                &p,
                "admin_product_added",
                &[
                    MessageArg::new("product_name", &product.name),
                    MessageArg::new("price", product.price),
                ],
            )
        }
        Err(CatalogError::DuplicateName(_)) => views::notice(&p, "admin_product_duplicate", &name_arg),
        Err(e) => {
            tracing::error!(admin_id = %session.user_id, name = %name, error = %e, "Failed to add product");
            views::notice(&p, "admin_product_add_failed", &name_arg)
        }
    };

    session.clear_slots();
    Ok(Step::to(DialogState::AdminMain, vec![notice, views::admin_panel(&p)]))
}

/// Every product with its availability, for management.
pub async fn manage_list(ctx: &HandlerContext, session: &mut Session) -> Result<Step, DomainError> {
    session.slots.editing_product = None;
    let products = ctx.catalog.list(ListFilter::All).await?;
    let p = ctx.phrases_for(&session.language);
    Ok(Step::to(DialogState::ManageList, vec![views::manage_list(&p, &products)]))
}

pub async fn select(ctx: &HandlerContext, session: &mut Session, id: ProductId) -> Result<Step, DomainError> {
    let Some(product) = ctx.catalog.find(id).await? else {
        return stale(ctx, session).await;
    };
    session.slots.editing_product = Some(product.id);
    let p = ctx.phrases_for(&session.language);
    Ok(Step::to(DialogState::ManageOptions, vec![views::product_options(&p, &product)]))
}

pub async fn start_price_edit(ctx: &HandlerContext, session: &mut Session) -> Result<Step, DomainError> {
    let Some(product) = editing(ctx, session).await? else {
        return stale(ctx, session).await;
    };
    let p = ctx.phrases_for(&session.language);
    Ok(Step::to(DialogState::EditPrice, vec![views::price_prompt(&p, &product)]))
}

/// Applies a new price to the product being managed.
pub async fn enter_new_price(ctx: &HandlerContext, session: &mut Session, text: &str) -> Result<Step, DomainError> {
    let price = match Price::parse(text) {
        Ok(price) => price,
        Err(_) => {
            let p = ctx.phrases_for(&session.language);
            return Ok(Step::stay(session, vec![views::notice(&p, "admin_invalid_price", &[])]));
        }
    };
    let Some(product) = editing(ctx, session).await? else {
        return stale(ctx, session).await;
    };

    let p = ctx.phrases_for(&session.language);
    match ctx.catalog.update(product.id, &ProductUpdate::price(price)).await {
        Ok(true) => {
            tracing::info!(admin_id = %session.user_id, product_id = %product.id, price = %price, "Price updated");
            let updated = Product { price, ..product };
            Ok(Step::to(
                DialogState::ManageOptions,
                vec![
                    views::notice(
                        &p,
                        "admin_price_updated",
                        &[
                            MessageArg::new("product_name", &updated.name),
                            MessageArg::new("price", price),
                        ],
                    ),
                    views::product_options(&p, &updated),
                ],
            ))
        }
        Ok(false) => stale(ctx, session).await,
        Err(e) => {
            tracing::error!(admin_id = %session.user_id, product_id = %product.id, error = %e, "Price update failed");
            Ok(Step::to(
                DialogState::ManageOptions,
                vec![
                    views::notice(&p, "admin_price_update_failed", &[]),
                    views::product_options(&p, &product),
                ],
            ))
        }
    }
}

/// Flips availability and re-renders the product options.
pub async fn toggle(ctx: &HandlerContext, session: &mut Session) -> Result<Step, DomainError> {
    let Some(product) = editing(ctx, session).await? else {
        return stale(ctx, session).await;
    };

    let p = ctx.phrases_for(&session.language);
    match ctx.catalog.toggle_availability(product.id).await {
        Ok(is_available) => {
            tracing::info!(admin_id = %session.user_id, product_id = %product.id, is_available, "Availability toggled");
            let status_key = if is_available {
                "admin_status_available_text"
            } else {
                "admin_status_unavailable_text"
            };
            let updated = Product { is_available, ..product };
            Ok(Step::to(
                DialogState::ManageOptions,
                vec![
                    views::notice(
                        &p,
                        "admin_product_set_status",
                        &[
                            MessageArg::new("product_name", &updated.name),
                            MessageArg::new("status_text", p.t(status_key)),
                        ],
                    ),
                    views::product_options(&p, &updated),
                ],
            ))
        }
        Err(CatalogError::NotFound(_)) => stale(ctx, session).await,
        Err(e) => {
            tracing::error!(admin_id = %session.user_id, product_id = %product.id, error = %e, "Availability toggle failed");
            Ok(Step::to(
                DialogState::ManageOptions,
                vec![
                    views::notice(&p, "admin_status_update_failed", &[]),
                    views::product_options(&p, &product),
                ],
            ))
        }
    }
}

pub async fn start_delete(ctx: &HandlerContext, session: &mut Session) -> Result<Step, DomainError> {
    let Some(product) = editing(ctx, session).await? else {
        return stale(ctx, session).await;
    };
    let p = ctx.phrases_for(&session.language);
    Ok(Step::to(DialogState::DeleteConfirm, vec![views::delete_confirm(&p, &product)]))
}

/// Deletes the product being managed and returns to the product list.
pub async fn confirm_delete(ctx: &HandlerContext, session: &mut Session) -> Result<Step, DomainError> {
    let Some(product) = editing(ctx, session).await? else {
        return stale(ctx, session).await;
    };

    let notice = match ctx.catalog.delete(product.id).await {
        Ok(()) => {
            tracing::info!(admin_id = %session.user_id, product_id = %product.id, "Product deleted");
            let p = ctx.phrases_for(&session.language);
            views::notice(&p, "admin_product_deleted", &[MessageArg::new("product_name", &product.name)])
        }
        Err(CatalogError::NotFound(_)) => return stale(ctx, session).await,
        Err(e) => {
            tracing::error!(admin_id = %session.user_id, product_id = %product.id, error = %e, "Product delete failed");
            let p = ctx.phrases_for(&session.language);
            views::notice(&p, "admin_product_delete_failed", &[])
        }
    };

    let mut step = manage_list(ctx, session).await?;
    step.replies.insert(0, notice);
    Ok(step)
}

async fn editing(ctx: &HandlerContext, session: &Session) -> Result<Option<Product>, DomainError> {
    match session.slots.editing_product {
        Some(id) => Ok(ctx.catalog.find(id).await?),
        None => Ok(None),
    }
}

/// The managed product is gone: report it and show the list again.
async fn stale(ctx: &HandlerContext, session: &mut Session) -> Result<Step, DomainError> {
    tracing::debug!(user_id = %session.user_id, product_id = ?session.slots.editing_product, "Managed product no longer exists");
    let mut step = manage_list(ctx, session).await?;
    let p = ctx.phrases_for(&session.language);
    step.replies.insert(0, views::notice(&p, "product_not_found", &[]));
    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::*;
    use crate::domain::conversation::Transition;

    fn fixture() -> Fixture {
        Fixture::new(InMemoryCatalog::with_products(&[("Apples", 2.0, true), ("Pears", 3.0, false)]))
    }

    fn managing(fx: &Fixture, id: i64, state: DialogState) -> Session {
        let mut session = fx.admin_session();
        session.state = state;
        session.slots.editing_product = Some(ProductId::new(id));
        session
    }

    mod add_product {
        use super::*;

        #[tokio::test]
        async fn name_then_price_creates_available_product() {
            let fx = fixture();
            let mut session = fx.admin_session();
            start_add(&fx.ctx, &mut session);

            let step = enter_name(&fx.ctx, &mut session, "  Kiwi ");
            assert_eq!(step.transition, Transition::Continue(DialogState::AddProductPrice));
            assert_eq!(session.slots.pending_product_name.as_deref(), Some("Kiwi"));

            let step = enter_price(&fx.ctx, &mut session, "4,5").await.unwrap();

            assert_eq!(step.transition, Transition::Continue(DialogState::AdminMain));
            assert_eq!(step.replies[0].text, "admin_product_added");
            assert!(session.slots.is_empty());
            let kiwi = fx.catalog.all().into_iter().find(|p| p.name == "Kiwi").unwrap();
            assert_eq!(kiwi.price.value(), 4.5);
            assert!(kiwi.is_available);
        }

        #[test]
        fn blank_name_reprompts() {
            let fx = fixture();
            let mut session = fx.admin_session();
            session.state = DialogState::AddProductName;

            let step = enter_name(&fx.ctx, &mut session, "   ");

            assert_eq!(step.transition, Transition::Continue(DialogState::AddProductName));
            assert_eq!(step.replies[0].text, "admin_invalid_product_name");
        }

        #[tokio::test]
        async fn invalid_price_keeps_pending_name() {
            let fx = fixture();
            let mut session = fx.admin_session();
            session.state = DialogState::AddProductPrice;
            session.slots.pending_product_name = Some("Kiwi".into());

            let step = enter_price(&fx.ctx, &mut session, "free").await.unwrap();

            assert_eq!(step.transition, Transition::Continue(DialogState::AddProductPrice));
            assert_eq!(step.replies[0].text, "admin_invalid_price");
            assert_eq!(session.slots.pending_product_name.as_deref(), Some("Kiwi"));
        }

        #[tokio::test]
        async fn duplicate_name_is_reported_distinctly() {
            let fx = fixture();
            let mut session = fx.admin_session();
            session.state = DialogState::AddProductPrice;
            session.slots.pending_product_name = Some("Apples".into());

            let step = enter_price(&fx.ctx, &mut session, "1").await.unwrap();

            assert_eq!(step.replies[0].text, "admin_product_duplicate");
            assert_eq!(fx.catalog.all().len(), 2);
        }

        #[tokio::test]
        async fn storage_failure_is_reported_as_add_failed() {
            let fx = Fixture::new(InMemoryCatalog::failing());
            let mut session = fx.admin_session();
            session.state = DialogState::AddProductPrice;
            session.slots.pending_product_name = Some("Kiwi".into());

            let step = enter_price(&fx.ctx, &mut session, "1").await.unwrap();

            assert_eq!(step.replies[0].text, "admin_product_add_failed");
            assert!(step.replies[1].has_action(&Action::AdminAddProduct));
        }
    }

    mod manage {
        use super::*;

        #[tokio::test]
        async fn list_includes_unavailable_products() {
            let fx = fixture();
            let mut session = fx.admin_session();

            let step = manage_list(&fx.ctx, &mut session).await.unwrap();

            assert!(step.replies[0].has_action(&Action::AdminSelectProduct(ProductId::new(2))));
            assert_eq!(step.transition, Transition::Continue(DialogState::ManageList));
        }

        #[tokio::test]
        async fn selecting_shows_options_matching_availability() {
            let fx = fixture();
            let mut session = fx.admin_session();
            session.state = DialogState::ManageList;

            let step = select(&fx.ctx, &mut session, ProductId::new(2)).await.unwrap();

            assert_eq!(step.transition, Transition::Continue(DialogState::ManageOptions));
            assert_eq!(session.slots.editing_product, Some(ProductId::new(2)));
            let labels: Vec<_> = step.replies[0].buttons.iter().flatten().map(|b| b.label.as_str()).collect();
            assert!(labels.contains(&"admin_set_available_button"));
        }

        #[tokio::test]
        async fn price_edit_updates_and_returns_to_options() {
            let fx = fixture();
            let mut session = managing(&fx, 1, DialogState::ManageOptions);
            let step = start_price_edit(&fx.ctx, &mut session).await.unwrap();
            assert_eq!(step.transition, Transition::Continue(DialogState::EditPrice));
            session.state = DialogState::EditPrice;

            let step = enter_new_price(&fx.ctx, &mut session, "2.75").await.unwrap();

            assert_eq!(step.transition, Transition::Continue(DialogState::ManageOptions));
            assert_eq!(step.replies[0].text, "admin_price_updated");
            assert_eq!(fx.catalog.get(ProductId::new(1)).unwrap().price.value(), 2.75);
        }

        #[tokio::test]
        async fn invalid_new_price_stays_in_edit() {
            let fx = fixture();
            let mut session = managing(&fx, 1, DialogState::EditPrice);

            let step = enter_new_price(&fx.ctx, &mut session, "0").await.unwrap();

            assert_eq!(step.transition, Transition::Continue(DialogState::EditPrice));
            assert_eq!(fx.catalog.get(ProductId::new(1)).unwrap().price.value(), 2.0);
        }

        #[tokio::test]
        async fn toggle_flips_and_rerenders_options() {
            let fx = fixture();
            let mut session = managing(&fx, 1, DialogState::ManageOptions);

            let step = toggle(&fx.ctx, &mut session).await.unwrap();

            assert!(!fx.catalog.get(ProductId::new(1)).unwrap().is_available);
            assert_eq!(step.transition, Transition::Continue(DialogState::ManageOptions));
            assert!(step.replies[1].has_action(&Action::AdminToggleAvailability));
        }

        #[tokio::test]
        async fn delete_requires_confirmation() {
            let fx = fixture();
            let mut session = managing(&fx, 2, DialogState::ManageOptions);

            let step = start_delete(&fx.ctx, &mut session).await.unwrap();
            assert_eq!(step.transition, Transition::Continue(DialogState::DeleteConfirm));
            assert!(step.replies[0].has_action(&Action::AdminDeleteConfirm));
            assert!(step.replies[0].has_action(&Action::AdminSelectProduct(ProductId::new(2))));
            assert!(fx.catalog.get(ProductId::new(2)).is_some());

            session.state = DialogState::DeleteConfirm;
            let step = confirm_delete(&fx.ctx, &mut session).await.unwrap();

            assert!(fx.catalog.get(ProductId::new(2)).is_none());
            assert_eq!(step.replies[0].text, "admin_product_deleted");
            assert_eq!(step.transition, Transition::Continue(DialogState::ManageList));
            assert!(session.slots.editing_product.is_none());
        }

        #[tokio::test]
        async fn vanished_product_returns_to_list() {
            let fx = fixture();
            let mut session = managing(&fx, 42, DialogState::ManageOptions);

            let step = toggle(&fx.ctx, &mut session).await.unwrap();

            assert_eq!(step.replies[0].text, "product_not_found");
            assert_eq!(step.transition, Transition::Continue(DialogState::ManageList));
            assert!(session.slots.editing_product.is_none());
        }
    }

    #[test]
    fn panel_clears_admin_slots() {
        let fx = fixture();
        let mut session = managing(&fx, 1, DialogState::EditPrice);

        let step = panel(&fx.ctx, &mut session);

        assert!(session.slots.is_empty());
        assert_eq!(step.transition, Transition::Continue(DialogState::AdminMain));
    }
}
