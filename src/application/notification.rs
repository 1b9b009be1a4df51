//! New-order notifications to administrators.
//!
//! Each administrator gets the order summary in their own stored language.
//! Deliveries run as independent tasks so one slow or failing recipient
//! never delays the customer or the other recipients.

use std::sync::Arc;

use tokio::task::JoinHandle;

use super::context::Phrases;
use super::views;
use crate::domain::conversation::{split_text, Reply, MAX_MESSAGE_CHARS};
use crate::domain::foundation::{LanguageCode, OrderId, UserId};
use crate::domain::i18n::PhraseResolver;
use crate::domain::ordering::NewOrder;
use crate::domain::user::UserProfile;
use crate::ports::{MessagingGateway, UserRepository};

/// Sends new-order summaries to every configured administrator.
#[derive(Clone)]
pub struct NotificationFanout {
    gateway: Arc<dyn MessagingGateway>,
    users: Arc<dyn UserRepository>,
    phrases: PhraseResolver,
    admins: Arc<[UserId]>,
}

/// Pending deliveries started by one fanout.
#[derive(Debug)]
pub struct FanoutHandle {
    deliveries: Vec<JoinHandle<bool>>,
}

impl FanoutHandle {
    /// Number of deliveries started.
    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Waits for every delivery and returns how many administrators
    /// received the whole summary.
    pub async fn join(self) -> usize {
        let mut delivered = 0;
        for delivery in self.deliveries {
            match delivery.await {
                Ok(true) => delivered += 1,
                Ok(false) => {}
                Err(e) => tracing::error!(error = %e, "Notification task failed"),
            }
        }
        delivered
    }
}

impl NotificationFanout {
    pub fn new(
        gateway: Arc<dyn MessagingGateway>,
        users: Arc<dyn UserRepository>,
        phrases: PhraseResolver,
        admins: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            gateway,
            users,
            phrases,
            admins: admins.into_iter().collect(),
        }
    }

    /// Starts one delivery per administrator and returns immediately.
    pub fn notify_new_order(&self, order_id: OrderId, customer: &UserProfile, order: &NewOrder) -> FanoutHandle {
        let customer = Arc::new(customer.clone());
        let order = Arc::new(order.clone());

        let deliveries = self
            .admins
            .iter()
            .copied()
            .map(|admin| {
                let fanout = self.clone();
                let customer = Arc::clone(&customer);
                let order = Arc::clone(&order);
                tokio::spawn(async move { fanout.deliver(admin, order_id, &customer, &order).await })
            })
            .collect();

        FanoutHandle { deliveries }
    }

    async fn admin_language(&self, admin: UserId) -> LanguageCode {
        match self.users.find(admin).await {
            Ok(Some(user)) if self.phrases.supports(&user.language) => user.language,
            Ok(_) => self.phrases.default_language().clone(),
            Err(e) => {
                tracing::warn!(admin_id = %admin, error = %e, "Could not load admin language");
                self.phrases.default_language().clone()
            }
        }
    }

    async fn deliver(&self, admin: UserId, order_id: OrderId, customer: &UserProfile, order: &NewOrder) -> bool {
        let language = self.admin_language(admin).await;
        let text = views::order_notification(&Phrases::new(&self.phrases, &language), order_id, customer, order);

        for chunk in split_text(&text, MAX_MESSAGE_CHARS) {
            if let Err(e) = self.gateway.send(admin, &Reply::text(chunk)).await {
                tracing::error!(
                    admin_id = %admin,
                    order_id = %order_id,
                    error = %e,
                    "Failed to notify admin of new order"
                );
                return false;
            }
        }

        tracing::info!(admin_id = %admin, order_id = %order_id, "Admin notified of new order");
        true
    }
}
