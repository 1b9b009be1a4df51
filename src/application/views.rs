//! Rendering of every screen the dialog can show.
//!
//! Views are pure: they take already-loaded data and the user's phrases
//! and return a [`Reply`]. Prices and totals are always shown with two
//! decimals.

use super::context::Phrases;
use crate::domain::catalog::Product;
use crate::domain::conversation::{Action, Button, DialogState, Reply, SelectedProduct, Session, MAX_MESSAGE_CHARS};
use crate::domain::foundation::{LanguageCode, OrderId, Quantity};
use crate::domain::i18n::MessageArg;
use crate::domain::ordering::{Cart, NewOrder, OrderStatus, OrderSummary, ShoppingListEntry};
use crate::domain::user::UserProfile;

/// Length a long listing is cut to before the truncation marker.
pub const TRUNCATE_AT_CHARS: usize = 4000;

/// Most "mark completed" buttons one order overview carries.
pub const MAX_ORDER_BUTTONS: usize = 50;

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn status_label(p: &Phrases<'_>, status: OrderStatus) -> String {
    p.tr_or(&format!("status_{}", status.as_str()), &[], status.as_str())
}

fn back_to_menu(p: &Phrases<'_>) -> Button {
    Button::new(p.t("back_to_main_menu_button"), Action::MainMenu)
}

fn back_to_admin(p: &Phrases<'_>) -> Button {
    Button::new(p.t("admin_back_to_admin_panel_button"), Action::AdminPanel)
}

/// Plain notice without buttons.
pub fn notice(p: &Phrases<'_>, key: &str, args: &[MessageArg]) -> Reply {
    Reply::text(p.tr(key, args))
}

/// The menu a user returns to: the admin panel for admins, else the main menu.
pub fn home(p: &Phrases<'_>, session: &Session, profile: &UserProfile) -> Reply {
    match session.home_state() {
        DialogState::AdminMain => admin_panel(p),
        _ => main_menu(p, profile),
    }
}

// ---------------------------------------------------------------------------
// Customer views
// ---------------------------------------------------------------------------

pub fn main_menu(p: &Phrases<'_>, profile: &UserProfile) -> Reply {
    Reply::text(p.tr(
        "welcome_message",
        &[MessageArg::new("name", profile.name_or_placeholder())],
    ))
    .with_button(p.t("browse_products_button"), Action::Browse)
    .with_button(p.t("view_cart_button"), Action::ViewCart)
    .with_button(p.t("my_orders_button"), Action::MyOrders)
    .with_button(p.t("set_language_button"), Action::SelectLanguage)
}

pub fn language_menu(p: &Phrases<'_>, languages: &[(LanguageCode, String)]) -> Reply {
    let reply = languages
        .iter()
        .fold(Reply::text(p.t("choose_language")), |reply, (code, label)| {
            reply.with_button(label.clone(), Action::SetLanguage(code.clone()))
        });
    reply.with_button(p.tr_or("back_button", &[], "Back"), Action::MainMenu)
}

/// Browse listing of available products.
pub fn product_list(p: &Phrases<'_>, products: &[Product]) -> Reply {
    if products.is_empty() {
        return Reply::text(p.t("no_products_available")).with_row(vec![back_to_menu(p)]);
    }
    let reply = products.iter().fold(Reply::text(p.t("products_title")), |reply, product| {
        reply.with_button(
            p.tr(
                "product_button",
                &[
                    MessageArg::new("name", &product.name),
                    MessageArg::new("price", product.price),
                ],
            ),
            Action::SelectProduct(product.id),
        )
    });
    reply
        .with_button(p.t("view_cart_button"), Action::ViewCart)
        .with_row(vec![back_to_menu(p)])
}

pub fn quantity_prompt(p: &Phrases<'_>, product: &SelectedProduct) -> Reply {
    Reply::text(p.tr(
        "product_selected_prompt",
        &[
            MessageArg::new("product_name", &product.name),
            MessageArg::new("price", product.price),
        ],
    ))
    .with_button(p.t("back_button"), Action::Browse)
    .with_button(p.t("view_cart_button"), Action::ViewCart)
}

/// Confirmation after a cart add, followed by the next-step choices.
pub fn item_added(p: &Phrases<'_>, product_name: &str, quantity: Quantity) -> Vec<Reply> {
    vec![
        Reply::text(p.tr(
            "item_added_to_cart",
            &[
                MessageArg::new("quantity", quantity),
                MessageArg::new("product_name", product_name),
            ],
        )),
        what_next(p),
    ]
}

/// Prompt offering more shopping, the cart or the main menu.
pub fn what_next(p: &Phrases<'_>) -> Reply {
    Reply::text(p.tr_or("what_next_prompt", &[], "What next?"))
        .with_button(p.t("add_more_products_button"), Action::AddMore)
        .with_button(p.t("view_cart_button"), Action::ViewCart)
        .with_row(vec![back_to_menu(p)])
}

pub fn cart(p: &Phrases<'_>, cart: Option<&Cart>) -> Reply {
    let cart = match cart {
        Some(cart) if !cart.is_empty() => cart,
        _ => {
            return Reply::text(p.t("cart_empty"))
                .with_button(p.t("browse_products_button"), Action::Browse)
                .with_row(vec![back_to_menu(p)]);
        }
    };

    let mut text = p.t("your_cart_title");
    text.push('\n');
    let mut reply = Reply::default();
    for (index, line) in cart.lines().iter().enumerate() {
        text.push_str(&p.tr(
            "cart_item_line",
            &[
                MessageArg::new("index", index + 1),
                MessageArg::new("name", &line.name),
                MessageArg::new("quantity", line.quantity),
                MessageArg::new("price", line.price),
                MessageArg::new("subtotal", money(line.subtotal())),
            ],
        ));
        text.push('\n');
        reply = reply.with_button(
            p.tr("remove_item_button", &[MessageArg::new("item_index", index + 1)]),
            Action::RemoveItem(index),
        );
    }
    text.push('\n');
    text.push_str(&p.tr("cart_total", &[MessageArg::new("total_price", money(cart.total()))]));
    reply.text = text;

    reply
        .with_button(p.t("checkout_button"), Action::Checkout)
        .with_button(p.t("add_more_products_button"), Action::Browse)
        .with_row(vec![back_to_menu(p)])
}

/// The user's own order history, newest first.
pub fn my_orders(p: &Phrases<'_>, orders: &[OrderSummary]) -> Reply {
    if orders.is_empty() {
        return Reply::text(p.t("no_orders_yet")).with_row(vec![back_to_menu(p)]);
    }
    let mut text = p.tr_or("my_orders_title", &[], "Orders:");
    text.push_str("\n\n");
    for order in orders {
        let items = order
            .items
            .iter()
            .map(|item| {
                p.tr(
                    "user_order_item_format",
                    &[
                        MessageArg::new("name", &item.product_name),
                        MessageArg::new("quantity", item.quantity),
                    ],
                )
            })
            .collect::<Vec<_>>();
        text.push_str(&p.tr(
            "order_details_format",
            &[
                MessageArg::new("order_id", order.id),
                MessageArg::new("date", order.created_at.display_short()),
                MessageArg::new("status", status_label(p, order.status)),
                MessageArg::new("total", money(order.total)),
                MessageArg::new("items", join_or_placeholder(&items, ", ")),
            ],
        ));
    }
    Reply::text(text).with_row(vec![back_to_menu(p)])
}

pub fn order_placed(p: &Phrases<'_>, order_id: OrderId, total: f64) -> Reply {
    Reply::text(p.tr(
        "order_placed_success",
        &[
            MessageArg::new("order_id", order_id),
            MessageArg::new("total_price", money(total)),
        ],
    ))
}

/// Failure notice after a rolled-back checkout; the cart is still intact.
pub fn order_failed(p: &Phrases<'_>) -> Vec<Reply> {
    vec![
        Reply::text(p.t("order_placed_error")),
        Reply::text(p.tr_or("what_next_prompt", &[], "What next?"))
            .with_button(p.t("view_cart_button"), Action::ViewCart)
            .with_row(vec![back_to_menu(p)]),
    ]
}

// ---------------------------------------------------------------------------
// Admin views
// ---------------------------------------------------------------------------

pub fn admin_panel(p: &Phrases<'_>) -> Reply {
    Reply::text(p.t("admin_panel_title"))
        .with_button(p.t("admin_add_product_button"), Action::AdminAddProduct)
        .with_button(p.t("admin_manage_products_button"), Action::AdminManageList)
        .with_button(p.t("admin_view_orders_button"), Action::AdminViewOrders)
        .with_button(p.t("admin_shopping_list_button"), Action::AdminShoppingList)
        .with_button(
            p.tr_or("admin_clear_orders_button", &[], "Clear Completed Orders"),
            Action::AdminClearOrders,
        )
        .with_button(p.t("admin_exit_button"), Action::MainMenu)
}

fn availability_label(p: &Phrases<'_>, is_available: bool) -> String {
    if is_available {
        p.tr_or("admin_status_available", &[], "Available")
    } else {
        p.tr_or("admin_status_unavailable", &[], "Unavailable")
    }
}

/// Every product, available or not, for management.
pub fn manage_list(p: &Phrases<'_>, products: &[Product]) -> Reply {
    if products.is_empty() {
        return Reply::text(p.t("admin_no_products_to_manage")).with_row(vec![back_to_admin(p)]);
    }
    products
        .iter()
        .fold(Reply::text(p.t("admin_select_product_to_manage")), |reply, product| {
            reply.with_button(
                p.tr(
                    "admin_product_button",
                    &[
                        MessageArg::new("name", &product.name),
                        MessageArg::new("price", product.price),
                        MessageArg::new("status", availability_label(p, product.is_available)),
                    ],
                ),
                Action::AdminSelectProduct(product.id),
            )
        })
        .with_row(vec![back_to_admin(p)])
}

pub fn product_options(p: &Phrases<'_>, product: &Product) -> Reply {
    let toggle_key = if product.is_available {
        "admin_set_unavailable_button"
    } else {
        "admin_set_available_button"
    };
    Reply::text(p.tr(
        "admin_managing_product",
        &[
            MessageArg::new("product_name", &product.name),
            MessageArg::new("price", product.price),
            MessageArg::new("status", availability_label(p, product.is_available)),
        ],
    ))
    .with_button(
        p.tr("admin_change_price_button", &[MessageArg::new("price", product.price)]),
        Action::AdminEditPrice,
    )
    .with_button(p.t(toggle_key), Action::AdminToggleAvailability)
    .with_button(p.t("admin_delete_product_button"), Action::AdminDeleteProduct)
    .with_button(p.t("admin_back_to_product_list_button"), Action::AdminManageList)
}

pub fn price_prompt(p: &Phrases<'_>, product: &Product) -> Reply {
    Reply::text(p.tr(
        "admin_enter_new_price",
        &[
            MessageArg::new("product_name", &product.name),
            MessageArg::new("current_price", product.price),
        ],
    ))
    .with_button(p.t("back_button"), Action::AdminSelectProduct(product.id))
}

pub fn delete_confirm(p: &Phrases<'_>, product: &Product) -> Reply {
    let name = [MessageArg::new("product_name", &product.name)];
    Reply::text(p.tr("admin_confirm_delete_prompt", &name))
        .with_button(p.tr("admin_confirm_delete_yes_button", &name), Action::AdminDeleteConfirm)
        .with_button(p.t("admin_confirm_delete_no_button"), Action::AdminSelectProduct(product.id))
}

pub fn clear_orders_confirm(p: &Phrases<'_>) -> Reply {
    Reply::text(p.tr_or(
        "admin_clear_orders_confirm_prompt",
        &[],
        "Delete ALL completed orders? This cannot be undone.",
    ))
    .with_button(
        p.tr_or("admin_clear_orders_yes_button", &[], "Yes, delete completed orders"),
        Action::AdminClearOrdersConfirm,
    )
    .with_button(
        p.tr_or("admin_clear_orders_no_button", &[], "No, cancel"),
        Action::AdminPanel,
    )
}

/// Every order with purchaser identity.
///
/// Outstanding orders get a "mark completed" button. Text longer than one
/// message is cut and marked as truncated; only orders still visible after
/// the cut get a button, and never more than [`MAX_ORDER_BUTTONS`].
pub fn all_orders(p: &Phrases<'_>, orders: &[OrderSummary]) -> Reply {
    let mut text = p.tr_or("admin_all_orders_title", &[], "All Customer Orders:\n\n");
    if orders.is_empty() {
        text.push_str(&p.t("admin_no_orders_found"));
    }

    let mut outstanding = Vec::new();
    for order in orders {
        let items = order
            .items
            .iter()
            .map(|item| {
                p.tr(
                    "admin_order_item_format",
                    &[
                        MessageArg::new("name", &item.product_name),
                        MessageArg::new("quantity", item.quantity),
                        MessageArg::new("price", item.unit_price),
                    ],
                )
            })
            .collect::<Vec<_>>();
        let user_name = if order.user_name.trim().is_empty() {
            "N/A"
        } else {
            order.user_name.as_str()
        };
        if order.status.is_outstanding() {
            outstanding.push((text.chars().count(), order.id));
        }
        text.push_str(&p.tr(
            "admin_order_details_format",
            &[
                MessageArg::new("order_id", order.id),
                MessageArg::new("user_name", user_name),
                MessageArg::new("customer_id", order.user_id),
                MessageArg::new("date", order.created_at.display_short()),
                MessageArg::new("total", money(order.total)),
                MessageArg::new("status", status_label(p, order.status)),
                MessageArg::new("items", join_or_placeholder(&items, "\n  ")),
            ],
        ));
    }

    let visible_until = if text.chars().count() <= MAX_MESSAGE_CHARS {
        usize::MAX
    } else {
        TRUNCATE_AT_CHARS
    };
    let mut reply = Reply::default();
    for (_, id) in outstanding
        .into_iter()
        .filter(|(start, _)| *start < visible_until)
        .take(MAX_ORDER_BUTTONS)
    {
        reply = reply.with_button(
            p.tr("admin_complete_order_button", &[MessageArg::new("order_id", id)]),
            Action::AdminCompleteOrder(id),
        );
    }

    reply.text = truncate_listing(p, text);
    reply.with_row(vec![back_to_admin(p)])
}

/// Outstanding demand per product.
pub fn shopping_list(p: &Phrases<'_>, entries: &[ShoppingListEntry]) -> Reply {
    if entries.is_empty() {
        return Reply::text(p.t("admin_shopping_list_empty")).with_row(vec![back_to_admin(p)]);
    }
    let mut text = p.tr_or("admin_shopping_list_title", &[], "Shopping List:");
    text.push_str("\n\n");
    for entry in entries {
        text.push_str(&p.tr(
            "admin_shopping_list_item_format",
            &[
                MessageArg::new("name", &entry.product_name),
                MessageArg::new("total_quantity", money(entry.total_quantity)),
            ],
        ));
    }
    Reply::text(text).with_row(vec![back_to_admin(p)])
}

/// New-order summary sent to administrators.
pub fn order_notification(p: &Phrases<'_>, order_id: OrderId, customer: &UserProfile, order: &NewOrder) -> String {
    let separator = "------------------------------------";
    let title = p.tr_or(
        "admin_new_order_notification_title",
        &[MessageArg::new("order_id", order_id)],
        "New Order #{order_id}",
    );
    let from = p.tr(
        "admin_order_from",
        &[
            MessageArg::new("name", customer.name_or_placeholder()),
            MessageArg::new("username", customer.handle_label()),
            MessageArg::new("customer_id", customer.id),
        ],
    );
    let lines = order
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            p.tr(
                "admin_order_item_line_format",
                &[
                    MessageArg::new("index", index + 1),
                    MessageArg::new("item_name", &line.product_name),
                    MessageArg::new("quantity", money(line.quantity.value())),
                    MessageArg::new("price_per_kg", line.unit_price),
                    MessageArg::new("item_subtotal", money(line.subtotal())),
                ],
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let total = p.tr(
        "admin_order_grand_total",
        &[MessageArg::new("total_price", money(order.total))],
    );

    format!(
        "{}\n{}\n\n{}\n{}\n{}\n{}\n{}",
        title,
        from,
        p.tr_or("admin_order_items_header", &[], "Items:"),
        separator,
        lines,
        separator,
        total
    )
}

fn join_or_placeholder(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(separator)
    }
}

fn truncate_listing(p: &Phrases<'_>, text: String) -> String {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return text;
    }
    let mut cut: String = text.chars().take(TRUNCATE_AT_CHARS).collect();
    cut.push_str("...\n");
    cut.push_str(&p.tr_or("admin_truncated_marker", &[], "(Truncated)"));
    cut
}
