//! In-memory port implementations shared by application tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::checkout::CheckoutService;
use super::context::HandlerContext;
use super::notification::NotificationFanout;
use crate::domain::catalog::{CatalogError, ListFilter, NewProduct, Product, ProductUpdate};
use crate::domain::conversation::{Reply, Session};
use crate::domain::foundation::{DomainError, ErrorCode, LanguageCode, OrderId, Price, ProductId, Timestamp, UserId};
use crate::domain::i18n::{PhraseCatalog, PhraseResolver};
use crate::domain::ordering::{LedgerError, NewOrder, OrderItem, OrderStatus, OrderSummary, ShoppingListEntry};
use crate::domain::user::{User, UserProfile};
use crate::ports::{CatalogStore, GatewayError, MessagingGateway, OrderLedger, UserRepository};

pub const ADMIN: UserId = UserId::new(900);
pub const CUSTOMER: UserId = UserId::new(1);

pub fn lang(code: &str) -> LanguageCode {
    LanguageCode::new(code).unwrap()
}

// ════════════════════════════════════════════════════════════════════════════
// Catalog
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct InMemoryCatalog {
    products: Mutex<Vec<Product>>,
    pub fail: bool,
}

impl InMemoryCatalog {
    pub fn with_products(products: &[(&str, f64, bool)]) -> Self {
        let products = products
            .iter()
            .enumerate()
            .map(|(i, (name, price, is_available))| Product {
                id: ProductId::new(i as i64 + 1),
                name: name.to_string(),
                price: Price::try_new(*price).unwrap(),
                is_available: *is_available,
            })
            .collect();
        Self {
            products: Mutex::new(products),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.products.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn all(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.fail {
            Err(CatalogError::storage("database is locked"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn create(&self, product: &NewProduct) -> Result<Product, CatalogError> {
        self.check()?;
        let mut products = self.products.lock().unwrap();
        if products.iter().any(|p| p.name == product.name()) {
            return Err(CatalogError::DuplicateName(product.name().to_string()));
        }
        let created = Product {
            id: ProductId::new(products.iter().map(|p| p.id.as_i64()).max().unwrap_or(0) + 1),
            name: product.name().to_string(),
            price: product.price(),
            is_available: true,
        };
        products.push(created.clone());
        Ok(created)
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn list(&self, filter: ListFilter) -> Result<Vec<Product>, CatalogError> {
        self.check()?;
        let mut products: Vec<_> = self
            .all()
            .into_iter()
            .filter(|p| filter == ListFilter::All || p.is_available)
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn update(&self, id: ProductId, update: &ProductUpdate) -> Result<bool, CatalogError> {
        self.check()?;
        let mut products = self.products.lock().unwrap();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(name) = &update.name {
            product.name = name.clone();
        }
        if let Some(is_available) = update.is_available {
            product.is_available = is_available;
        }
        Ok(true)
    }

    async fn toggle_availability(&self, id: ProductId) -> Result<bool, CatalogError> {
        self.check()?;
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        product.is_available = !product.is_available;
        Ok(product.is_available)
    }

    async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        self.check()?;
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Ledger
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct InMemoryLedger {
    orders: Mutex<Vec<OrderSummary>>,
    pub fail: bool,
    ack_delay: Option<Duration>,
}

impl InMemoryLedger {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Ledger that records each order and only then stalls before answering.
    pub fn slow_to_acknowledge(delay: Duration) -> Self {
        Self {
            ack_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn orders(&self) -> Vec<OrderSummary> {
        self.orders.lock().unwrap().clone()
    }

    pub fn set_status(&self, id: OrderId, status: OrderStatus) {
        if let Some(order) = self.orders.lock().unwrap().iter_mut().find(|o| o.id == id) {
            order.status = status;
        }
    }

    fn record(&self, order: &NewOrder) -> OrderId {
        let mut orders = self.orders.lock().unwrap();
        let id = OrderId::new(orders.len() as i64 + 1);
        orders.push(OrderSummary {
            id,
            user_id: order.user_id,
            user_name: order.user_name.clone(),
            created_at: Timestamp::now(),
            total: order.total,
            status: OrderStatus::Pending,
            items: order
                .lines
                .iter()
                .map(|l| OrderItem {
                    product_id: l.product_id,
                    product_name: l.product_name.clone(),
                    quantity: l.quantity,
                    unit_price: l.unit_price,
                })
                .collect(),
        });
        id
    }

    fn check(&self) -> Result<(), LedgerError> {
        if self.fail {
            Err(LedgerError::storage("disk I/O error"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl OrderLedger for InMemoryLedger {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderId, LedgerError> {
        self.check()?;
        let id = self.record(order);
        if let Some(delay) = self.ack_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(id)
    }

    async fn user_history(&self, user_id: UserId) -> Result<Vec<OrderSummary>, LedgerError> {
        self.check()?;
        let mut orders: Vec<_> = self.orders().into_iter().filter(|o| o.user_id == user_id).collect();
        orders.reverse();
        Ok(orders)
    }

    async fn all_orders(&self) -> Result<Vec<OrderSummary>, LedgerError> {
        self.check()?;
        let mut orders = self.orders();
        orders.reverse();
        Ok(orders)
    }

    async fn shopping_list(&self) -> Result<Vec<ShoppingListEntry>, LedgerError> {
        self.check()?;
        let mut totals: Vec<ShoppingListEntry> = Vec::new();
        for order in self.orders().iter().filter(|o| o.status.is_outstanding()) {
            for item in &order.items {
                match totals.iter_mut().find(|e| e.product_name == item.product_name) {
                    Some(entry) => entry.total_quantity += item.quantity.value(),
                    None => totals.push(ShoppingListEntry {
                        product_name: item.product_name.clone(),
                        total_quantity: item.quantity.value(),
                    }),
                }
            }
        }
        totals.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        Ok(totals)
    }

    async fn clear_completed(&self) -> Result<u64, LedgerError> {
        self.check()?;
        let mut orders = self.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|o| o.status != OrderStatus::Completed);
        Ok((before - orders.len()) as u64)
    }

    async fn mark_completed(&self, id: OrderId) -> Result<(), LedgerError> {
        self.check()?;
        let mut orders = self.orders.lock().unwrap();
        let order = orders.iter_mut().find(|o| o.id == id).ok_or(LedgerError::NotFound(id))?;
        if !order.status.is_outstanding() {
            return Err(LedgerError::InvalidTransition {
                id,
                from: order.status,
                to: OrderStatus::Completed,
            });
        }
        order.status = OrderStatus::Completed;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<UserId, User>>,
    pub fail: bool,
}

impl InMemoryUsers {
    pub fn failing() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    pub fn language_of(&self, id: UserId) -> Option<LanguageCode> {
        self.users.lock().unwrap().get(&id).map(|u| u.language.clone())
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail {
            Err(DomainError::new(ErrorCode::DatabaseError, "users table unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn ensure(&self, profile: &UserProfile, is_admin: bool, default_language: &LanguageCode) -> Result<User, DomainError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let user = users.entry(profile.id).or_insert_with(|| User {
            id: profile.id,
            display_name: profile.display_name.clone(),
            handle: profile.handle.clone(),
            is_admin,
            language: default_language.clone(),
        });
        user.display_name = profile.display_name.clone();
        user.handle = profile.handle.clone();
        user.is_admin = is_admin;
        Ok(user.clone())
    }

    async fn set_language(&self, id: UserId, language: &LanguageCode) -> Result<(), DomainError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "unknown user"))?;
        user.language = language.clone();
        Ok(())
    }

    async fn find(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Gateway
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<(UserId, Reply)>>,
}

impl RecordingGateway {
    pub fn sent_to(&self, user: UserId) -> Vec<Reply> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| *to == user)
            .map(|(_, r)| r.clone())
            .collect()
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send(&self, to: UserId, reply: &Reply) -> Result<(), GatewayError> {
        self.sent.lock().unwrap().push((to, reply.clone()));
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wiring
// ════════════════════════════════════════════════════════════════════════════

/// Phrase tables with only language names; every other key resolves to itself.
pub fn resolver() -> PhraseResolver {
    let catalog = PhraseCatalog::new()
        .with_table(lang("en"), [("language_name", "English")])
        .with_table(lang("lt"), [("language_name", "Lietuvių")]);
    PhraseResolver::new(catalog, lang("en"), lang("en"))
}

pub struct Fixture {
    pub catalog: Arc<InMemoryCatalog>,
    pub ledger: Arc<InMemoryLedger>,
    pub users: Arc<InMemoryUsers>,
    pub gateway: Arc<RecordingGateway>,
    pub ctx: HandlerContext,
}

impl Fixture {
    pub fn new(catalog: InMemoryCatalog) -> Self {
        Self::with(catalog, InMemoryLedger::default(), InMemoryUsers::default())
    }

    pub fn with(catalog: InMemoryCatalog, ledger: InMemoryLedger, users: InMemoryUsers) -> Self {
        let catalog = Arc::new(catalog);
        let ledger = Arc::new(ledger);
        let users = Arc::new(users);
        let gateway = Arc::new(RecordingGateway::default());
        let phrases = resolver();
        let fanout = NotificationFanout::new(gateway.clone(), users.clone(), phrases.clone(), [ADMIN]);
        let checkout = CheckoutService::new(ledger.clone(), fanout);
        let ctx = HandlerContext::new(catalog.clone(), ledger.clone(), users.clone(), phrases, checkout, [ADMIN]);
        Self {
            catalog,
            ledger,
            users,
            gateway,
            ctx,
        }
    }

    pub fn customer_session(&self) -> Session {
        Session::new(CUSTOMER, lang("en"), false)
    }

    pub fn admin_session(&self) -> Session {
        Session::new(ADMIN, lang("en"), true)
    }
}

pub fn customer() -> UserProfile {
    UserProfile::new(CUSTOMER, "Ann", Some("ann".into()))
}

pub fn admin() -> UserProfile {
    UserProfile::new(ADMIN, "Boss", None)
}
