use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use shopfront_domain::order::{OrderStatus, PaymentMethod};
use shopfront_domain::role::AdminRole;

use crate::error::StoreServiceError;

/// Mirror of an identity that has authenticated through the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `{email, name}` attached to admin-facing listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub email: String,
    pub name: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Lower-cased, trimmed form used for every stored and compared email.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The configured identity that is always `super_admin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootIdentity {
    email: String,
}

impl RootIdentity {
    pub fn new(email: &str) -> Self {
        Self {
            email: normalize_email(email),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn matches(&self, email: &str) -> bool {
        !self.email.is_empty() && normalize_email(email) == self.email
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Mutable product fields supplied by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub stock: i32,
}

impl ProductFields {
    pub fn validate(&self) -> Result<(), StoreServiceError> {
        if self.price < Decimal::ZERO {
            return Err(StoreServiceError::InvalidPrice);
        }
        if self.stock < 0 {
            return Err(StoreServiceError::InvalidStock);
        }
        Ok(())
    }
}

// ── Cart ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

/// A cart item joined with its live product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: Decimal,
}

// ── Orders ───────────────────────────────────────────────────────────────────

/// Line item frozen into an order at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

impl ShippingAddress {
    /// Every field must be non-empty after trimming.
    pub fn validate(&self) -> Result<(), StoreServiceError> {
        let fields = [
            ("fullName", &self.full_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
            ("phone", &self.phone),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(StoreServiceError::MissingShippingField(name)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithOwner {
    pub order: Order,
    pub owner: Option<UserSummary>,
}

/// Aggregates over the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderStats {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub pending_orders: u64,
}

// ── Admin registry ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub role: AdminRole,
    pub added_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminWithUser {
    pub admin: AdminUser,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminStatus {
    pub is_admin: bool,
    pub role: Option<AdminRole>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_orders: u64,
    pub total_users: u64,
    pub total_admins: u64,
    pub total_revenue: Decimal,
    pub pending_orders: u64,
}
