use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use shopfront_domain::order::OrderStatus;
use shopfront_domain::role::AdminRole;
use shopfront_store::domain::repository::{
    AdminRepository, CartRepository, OrderRepository, ProductRepository, UserRepository,
};
use shopfront_store::domain::types::{
    AdminUser, CartItem, Order, OrderStats, Product, ProductFields, RootIdentity, ShippingAddress,
    User,
};
use shopfront_store::error::StoreServiceError;
use shopfront_store::usecase::access::AccessPolicy;

pub const ROOT_EMAIL: &str = "owner@example.com";

// ── MemoryStore ──────────────────────────────────────────────────────────────

/// Rows of every table, shared by the repository handles below.
#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub cart_items: Vec<CartItem>,
    pub orders: Vec<Order>,
    pub admins: Vec<AdminUser>,
}

/// In-memory database. Repository handles created from the same store see
/// each other's writes, so a checkout clears the cart other handles read.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access for seeding and post-execution inspection.
    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn users(&self) -> MockUserRepo {
        MockUserRepo {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn products(&self) -> MockProductRepo {
        MockProductRepo {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn carts(&self) -> MockCartRepo {
        MockCartRepo {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn orders(&self) -> MockOrderRepo {
        MockOrderRepo {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn admins(&self) -> MockAdminRepo {
        MockAdminRepo {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn access(&self) -> AccessPolicy<MockUserRepo, MockAdminRepo> {
        AccessPolicy {
            users: self.users(),
            admins: self.admins(),
            root: root_identity(),
        }
    }

    pub fn add_user(&self, handle: &str) -> User {
        let user = test_user(handle);
        self.tables().users.push(user.clone());
        user
    }

    pub fn add_product(&self, product: Product) -> Product {
        self.tables().products.push(product.clone());
        product
    }

    pub fn add_admin(&self, user: &User, role: AdminRole) -> AdminUser {
        let admin = AdminUser {
            id: Uuid::now_v7(),
            user_id: user.id,
            email: user.email.clone(),
            role,
            added_by: None,
            created_at: Utc::now(),
        };
        self.tables().admins.push(admin.clone());
        admin
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    tables: Arc<Mutex<Tables>>,
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn upsert(&self, user: &User) -> Result<User, StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables.users.iter_mut().find(|u| u.id == user.id) {
            existing.email = user.email.clone();
            existing.name = user.name.clone();
            existing.updated_at = user.updated_at;
            return Ok(existing.clone());
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }

    async fn count(&self) -> Result<u64, StoreServiceError> {
        Ok(self.tables.lock().unwrap().users.len() as u64)
    }
}

// ── MockProductRepo ──────────────────────────────────────────────────────────

pub struct MockProductRepo {
    tables: Arc<Mutex<Tables>>,
}

impl MockProductRepo {
    fn select(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        let tables = self.tables.lock().unwrap();
        let mut products: Vec<Product> = tables.products.iter().filter(|p| keep(p)).cloned().collect();
        products.sort_by_key(|p| p.created_at);
        products
    }
}

impl ProductRepository for MockProductRepo {
    async fn list_active(&self) -> Result<Vec<Product>, StoreServiceError> {
        Ok(self.select(|p| p.is_active))
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, StoreServiceError> {
        Ok(self.select(|p| p.category == category))
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreServiceError> {
        Ok(self.select(|_| true))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, StoreServiceError> {
        Ok(self.select(|p| ids.contains(&p.id)))
    }

    async fn create(&self, product: &Product) -> Result<(), StoreServiceError> {
        self.tables.lock().unwrap().products.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<bool, StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        Ok(tables.products.len() < before)
    }

    async fn active_categories(&self) -> Result<Vec<String>, StoreServiceError> {
        let mut categories: Vec<String> = self
            .select(|p| p.is_active)
            .into_iter()
            .map(|p| p.category)
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn count(&self) -> Result<u64, StoreServiceError> {
        Ok(self.tables.lock().unwrap().products.len() as u64)
    }
}

// ── MockCartRepo ─────────────────────────────────────────────────────────────

pub struct MockCartRepo {
    tables: Arc<Mutex<Tables>>,
}

impl CartRepository for MockCartRepo {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CartItem>, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .cart_items
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartItem>, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.cart_items.iter().find(|i| i.id == id).cloned())
    }

    async fn add_quantity(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> Result<CartItem, StoreServiceError> {
        // Same bound as the INTEGER column.
        let fits = |q: u32| i32::try_from(q).is_ok();
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables
            .cart_items
            .iter_mut()
            .find(|i| i.user_id == user_id && i.product_id == product_id)
        {
            let merged = existing
                .quantity
                .checked_add(quantity)
                .filter(|q| fits(*q))
                .ok_or(StoreServiceError::InvalidQuantity)?;
            existing.quantity = merged;
            return Ok(existing.clone());
        }
        if !fits(quantity) {
            return Err(StoreServiceError::InvalidQuantity);
        }
        let item = CartItem {
            id: Uuid::now_v7(),
            user_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        };
        tables.cart_items.push(item.clone());
        Ok(item)
    }

    async fn set_quantity(&self, id: Uuid, quantity: u32) -> Result<(), StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(item) = tables.cart_items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.cart_items.len();
        tables.cart_items.retain(|i| i.id != id);
        Ok(tables.cart_items.len() < before)
    }

    async fn clear(&self, user_id: Uuid) -> Result<u64, StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.cart_items.len();
        tables.cart_items.retain(|i| i.user_id != user_id);
        Ok((before - tables.cart_items.len()) as u64)
    }
}

// ── MockOrderRepo ────────────────────────────────────────────────────────────

pub struct MockOrderRepo {
    tables: Arc<Mutex<Tables>>,
}

impl MockOrderRepo {
    fn select(&self, keep: impl Fn(&Order) -> bool) -> Vec<Order> {
        let tables = self.tables.lock().unwrap();
        let mut orders: Vec<Order> = tables.orders.iter().filter(|o| keep(o)).cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }
}

impl OrderRepository for MockOrderRepo {
    async fn create_and_clear_cart(&self, order: &Order) -> Result<(), StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        tables.orders.push(order.clone());
        tables.cart_items.retain(|i| i.user_id != order.user_id);
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreServiceError> {
        Ok(self.select(|o| o.user_id == user_id))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_all(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StoreServiceError> {
        Ok(self.select(|o| status.is_none_or(|s| o.status == s)))
    }

    async fn transition_status(
        &self,
        id: Uuid,
        next: OrderStatus,
    ) -> Result<bool, StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.orders.iter_mut().find(|o| o.id == id) {
            Some(order) if next.predecessors().any(|from| from == order.status) => {
                order.status = next;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn stats(&self) -> Result<OrderStats, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(OrderStats {
            total_orders: tables.orders.len() as u64,
            total_revenue: tables.orders.iter().map(|o| o.total_amount).sum(),
            pending_orders: tables
                .orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count() as u64,
        })
    }
}

// ── MockAdminRepo ────────────────────────────────────────────────────────────

pub struct MockAdminRepo {
    tables: Arc<Mutex<Tables>>,
}

impl AdminRepository for MockAdminRepo {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<AdminUser>, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.admins.iter().find(|a| a.user_id == user_id).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, StoreServiceError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.admins.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<AdminUser>, StoreServiceError> {
        let mut admins = self.tables.lock().unwrap().admins.clone();
        admins.sort_by_key(|a| a.created_at);
        Ok(admins)
    }

    async fn create_if_absent(&self, admin: &AdminUser) -> Result<bool, StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.admins.iter().any(|a| a.user_id == admin.user_id) {
            return Ok(false);
        }
        tables.admins.push(admin.clone());
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.admins.len();
        tables.admins.retain(|a| a.id != id);
        Ok(tables.admins.len() < before)
    }

    async fn count(&self) -> Result<u64, StoreServiceError> {
        Ok(self.tables.lock().unwrap().admins.len() as u64)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn root_identity() -> RootIdentity {
    RootIdentity::new(ROOT_EMAIL)
}

/// A user registered as `<handle>@example.com`.
pub fn test_user(handle: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        email: format!("{handle}@example.com"),
        name: Some(handle.to_owned()),
        created_at: now,
        updated_at: now,
    }
}

/// `created_at` is offset by `age_secs` into the past so listings have a
/// stable order.
pub fn test_product(name: &str, category: &str, price: Decimal, age_secs: i64) -> Product {
    Product {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        description: format!("{name} description"),
        price,
        category: category.to_owned(),
        image_url: format!("https://img.example.com/{name}.png"),
        stock: 10,
        is_active: true,
        created_at: Utc::now() - Duration::seconds(age_secs),
    }
}

pub fn product_fields(name: &str, category: &str, price: Decimal) -> ProductFields {
    ProductFields {
        name: name.to_owned(),
        description: format!("{name} description"),
        price,
        category: category.to_owned(),
        image_url: format!("https://img.example.com/{name}.png"),
        stock: 5,
    }
}

pub fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Ada Lovelace".to_owned(),
        address: "12 Analytical St".to_owned(),
        city: "London".to_owned(),
        state: "LDN".to_owned(),
        zip_code: "N1 9GU".to_owned(),
        phone: "555-0100".to_owned(),
    }
}
