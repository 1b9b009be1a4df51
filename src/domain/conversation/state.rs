//! Dialog state machine.
//!
//! One state per step of the customer and admin flows. The main menu and the
//! admin panel are reachable from every state.

use serde::{Deserialize, Serialize};

use super::Action;
use crate::domain::foundation::StateMachine;

/// The step a user's conversation is at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    #[default]
    MainMenu,
    LanguageSelect,
    MyOrders,
    BrowseProducts,
    SelectQuantity,
    ViewCart,

    AdminMain,
    AddProductName,
    AddProductPrice,
    ManageList,
    ManageOptions,
    EditPrice,
    DeleteConfirm,
    ClearOrdersConfirm,
}

impl DialogState {
    /// Returns true if free text is handled in this state.
    pub fn accepts_text(&self) -> bool {
        matches!(
            self,
            Self::SelectQuantity | Self::AddProductName | Self::AddProductPrice | Self::EditPrice
        )
    }

    /// Returns true if the button action is handled in this state.
    ///
    /// Top-level actions are accepted everywhere.
    pub fn accepts_action(&self, action: &Action) -> bool {
        use Action::*;
        if action.is_top_level() {
            return true;
        }
        match self {
            Self::MainMenu => matches!(action, Browse | ViewCart | MyOrders | SelectLanguage),
            Self::LanguageSelect => matches!(action, SetLanguage(_)),
            Self::MyOrders => false,
            Self::BrowseProducts => matches!(action, SelectProduct(_) | ViewCart | AddMore),
            Self::SelectQuantity => matches!(action, Browse | ViewCart),
            Self::ViewCart => matches!(action, RemoveItem(_) | Checkout | AddMore | Browse),
            Self::AdminMain => matches!(
                action,
                AdminAddProduct
                    | AdminManageList
                    | AdminViewOrders
                    | AdminShoppingList
                    | AdminClearOrders
                    | AdminCompleteOrder(_)
            ),
            Self::AddProductName | Self::AddProductPrice => false,
            Self::ManageList => matches!(action, AdminSelectProduct(_)),
            Self::ManageOptions => matches!(
                action,
                AdminEditPrice | AdminToggleAvailability | AdminDeleteProduct | AdminManageList
            ),
            Self::EditPrice => matches!(action, AdminSelectProduct(_)),
            Self::DeleteConfirm => matches!(action, AdminDeleteConfirm | AdminSelectProduct(_)),
            Self::ClearOrdersConfirm => matches!(action, AdminClearOrdersConfirm),
        }
    }

    /// Returns true for states that belong to the admin flows.
    pub fn is_admin_flow(&self) -> bool {
        matches!(
            self,
            Self::AdminMain
                | Self::AddProductName
                | Self::AddProductPrice
                | Self::ManageList
                | Self::ManageOptions
                | Self::EditPrice
                | Self::DeleteConfirm
                | Self::ClearOrdersConfirm
        )
    }

    fn flow_targets(&self) -> &'static [DialogState] {
        use DialogState::*;
        match self {
            MainMenu => &[LanguageSelect, BrowseProducts, ViewCart, MyOrders],
            LanguageSelect | MyOrders => &[],
            BrowseProducts => &[SelectQuantity, ViewCart],
            SelectQuantity => &[BrowseProducts, ViewCart],
            ViewCart => &[BrowseProducts],
            AdminMain => &[AddProductName, ManageList, ClearOrdersConfirm],
            AddProductName => &[AddProductPrice],
            AddProductPrice => &[],
            ManageList => &[ManageOptions],
            ManageOptions => &[EditPrice, DeleteConfirm, ManageList],
            EditPrice => &[ManageOptions, ManageList],
            DeleteConfirm => &[ManageList, ManageOptions],
            ClearOrdersConfirm => &[],
        }
    }
}

impl StateMachine for DialogState {
    fn can_transition_to(&self, target: &Self) -> bool {
        // Re-prompts stay put; both menus are always reachable.
        *target == *self
            || matches!(target, Self::MainMenu | Self::AdminMain)
            || self.flow_targets().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        let mut targets = vec![*self];
        for t in [Self::MainMenu, Self::AdminMain]
            .iter()
            .chain(self.flow_targets())
        {
            if !targets.contains(t) {
                targets.push(*t);
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{OrderId, ProductId};

    const ALL: [DialogState; 14] = [
        DialogState::MainMenu,
        DialogState::LanguageSelect,
        DialogState::MyOrders,
        DialogState::BrowseProducts,
        DialogState::SelectQuantity,
        DialogState::ViewCart,
        DialogState::AdminMain,
        DialogState::AddProductName,
        DialogState::AddProductPrice,
        DialogState::ManageList,
        DialogState::ManageOptions,
        DialogState::EditPrice,
        DialogState::DeleteConfirm,
        DialogState::ClearOrdersConfirm,
    ];

    mod state_definition {
        use super::*;

        #[test]
        fn default_state_is_main_menu() {
            assert_eq!(DialogState::default(), DialogState::MainMenu);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&DialogState::SelectQuantity).unwrap();
            assert_eq!(json, "\"select_quantity\"");
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn every_state_reaches_both_menus() {
            for s in ALL {
                assert!(s.can_transition_to(&DialogState::MainMenu), "{:?}", s);
                assert!(s.can_transition_to(&DialogState::AdminMain), "{:?}", s);
            }
        }

        #[test]
        fn no_state_is_terminal() {
            for s in ALL {
                assert!(!s.is_terminal());
            }
        }

        #[test]
        fn quantity_cannot_jump_to_admin_steps() {
            assert!(DialogState::SelectQuantity
                .transition_to(DialogState::EditPrice)
                .is_err());
        }

        #[test]
        fn add_product_flow_is_ordered() {
            assert!(DialogState::AdminMain.can_transition_to(&DialogState::AddProductName));
            assert!(DialogState::AddProductName.can_transition_to(&DialogState::AddProductPrice));
            assert!(!DialogState::AdminMain.can_transition_to(&DialogState::AddProductPrice));
        }

        #[test]
        fn valid_transitions_agree_with_can_transition_to() {
            for from in ALL {
                for to in ALL {
                    assert_eq!(
                        from.can_transition_to(&to),
                        from.valid_transitions().contains(&to),
                        "{:?} -> {:?}",
                        from,
                        to
                    );
                }
            }
        }
    }

    mod accepted_input {
        use super::*;

        #[test]
        fn text_only_in_entry_states() {
            let texty: Vec<_> = ALL.into_iter().filter(|s| s.accepts_text()).collect();
            assert_eq!(
                texty,
                vec![
                    DialogState::SelectQuantity,
                    DialogState::AddProductName,
                    DialogState::AddProductPrice,
                    DialogState::EditPrice,
                ]
            );
        }

        #[test]
        fn top_level_actions_accepted_everywhere() {
            for s in ALL {
                assert!(s.accepts_action(&Action::MainMenu));
                assert!(s.accepts_action(&Action::AdminPanel));
            }
        }

        #[test]
        fn checkout_only_from_cart() {
            for s in ALL {
                assert_eq!(s.accepts_action(&Action::Checkout), s == DialogState::ViewCart);
            }
        }

        #[test]
        fn product_selection_scoped_to_browse() {
            assert!(DialogState::BrowseProducts.accepts_action(&Action::SelectProduct(ProductId::new(1))));
            assert!(!DialogState::MainMenu.accepts_action(&Action::SelectProduct(ProductId::new(1))));
        }

        #[test]
        fn completing_orders_only_from_admin_panel() {
            let action = Action::AdminCompleteOrder(OrderId::new(3));
            assert!(DialogState::AdminMain.accepts_action(&action));
            assert!(!DialogState::ManageList.accepts_action(&action));
        }
    }

    #[test]
    fn admin_flow_states_are_flagged() {
        assert!(DialogState::EditPrice.is_admin_flow());
        assert!(!DialogState::ViewCart.is_admin_flow());
    }
}
